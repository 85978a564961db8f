//! # Configuration Management
//!
//! Layered configuration for the portal service: built-in defaults, then an
//! optional file named by `PORTAL_CONFIG`, then `PORTAL__*` environment
//! variables (double underscore separates sections, e.g. `PORTAL__SERVER__PORT`).

mod settings;

pub use settings::{AppConfig, AuthConfig, ObservabilityConfig, ServerConfig, StaticTokenConfig};

use crate::Result;

/// Environment variable naming an optional configuration file
pub const CONFIG_FILE_ENV: &str = "PORTAL_CONFIG";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "PORTAL";

impl AppConfig {
    /// Load configuration from defaults, `PORTAL_CONFIG` and the environment.
    pub fn load() -> Result<Self> {
        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load_from(file.as_deref())
    }

    /// Load configuration with an explicit file path, still honoring the environment.
    pub fn load_from(path: Option<&str>) -> Result<Self> {
        let defaults = config::Config::try_from(&AppConfig::default())?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
