//! # Structured Logging
//!
//! Subscriber setup plus span helpers shared by the HTTP layer.

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};

/// Create a tracing span for request tracking.
///
/// ```rust
/// let _span = portal_rest::request_span!("GET", "/apis/api-1");
/// let _span = portal_rest::request_span!("PUT", "/applications/app-1", application_id = "app-1");
/// ```
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4(),
            user_id = tracing::field::Empty
        )
    };
    ($method:expr, $path:expr, $($field:tt)*) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4(),
            user_id = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Build the filter from `log_level`; `RUST_LOG` wins when set.
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, JSON or human readable.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = env_filter(&config.log_level);

    let installed = if config.json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_current_span(true)
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_target(true).with_env_filter(filter).try_init()
    };

    installed.map_err(|e| Error::config(format!("Failed to install tracing subscriber: {}", e)))
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::AppConfig) {
    tracing::info!(
        server_address = %config.server.bind_address(),
        base_path = %config.server.base_path,
        cors_enabled = %config.server.enable_cors,
        static_tokens = config.auth.tokens.len(),
        metrics_enabled = %config.observability.enable_metrics,
        "Portal REST configuration"
    );
}
