//! # Configuration Settings
//!
//! Defines the configuration structure for the portal REST service.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    #[validate(nested)]
    pub server: ServerConfig,

    /// Observability configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,

    /// Bearer token configuration
    #[validate(nested)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;
        self.validate_custom()
    }

    fn validate_custom(&self) -> Result<()> {
        if self.observability.enable_metrics && self.observability.metrics_port == self.server.port
        {
            return Err(Error::config("Server and metrics ports cannot be the same"));
        }

        let mut seen = std::collections::HashSet::new();
        for token in &self.auth.tokens {
            if !seen.insert(token.token.as_str()) {
                return Err(Error::config(format!(
                    "Duplicate bearer token configured for user '{}'",
                    token.user_id
                )));
            }
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,

    /// Prefix every portal resource is mounted under, e.g. `/portal/environments/DEFAULT`
    #[validate(custom(function = "validate_base_path"))]
    pub base_path: String,

    /// Maximum request body size in bytes
    #[validate(range(min = 1024, message = "Max body size must be at least 1KB"))]
    pub max_body_size: usize,

    /// Enable CORS
    pub enable_cors: bool,

    /// CORS allowed origins (empty = allow all)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8083,
            base_path: String::new(),
            max_body_size: 1024 * 1024, // 1MB
            enable_cors: true,
            cors_origins: vec![],
        }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn validate_base_path(base_path: &str) -> std::result::Result<(), ValidationError> {
    if base_path.is_empty() {
        return Ok(());
    }
    if !base_path.starts_with('/') || base_path.ends_with('/') || base_path.contains("//") {
        let mut error = ValidationError::new("base_path");
        error.message =
            Some("Base path must start with '/' and must not end with '/'".into());
        return Err(error);
    }
    Ok(())
}

/// Observability configuration for logging and metrics
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing service name
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error) or a full filter directive
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,

    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Metrics server port (0 = disabled)
    pub metrics_port: u16,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "portal-rest".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
            enable_metrics: false,
            metrics_port: 9090,
        }
    }
}

impl ObservabilityConfig {
    /// Get metrics bind address (None if disabled)
    pub fn metrics_bind_address(&self) -> Option<String> {
        if !self.enable_metrics || self.metrics_port == 0 {
            None
        } else {
            Some(format!("0.0.0.0:{}", self.metrics_port))
        }
    }
}

/// Bearer tokens accepted by the static identity provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AuthConfig {
    #[validate(nested)]
    pub tokens: Vec<StaticTokenConfig>,
}

/// One bearer token and the identity it resolves to
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct StaticTokenConfig {
    #[validate(length(min = 8, message = "Token must be at least 8 characters long"))]
    pub token: String,

    #[validate(length(min = 1, message = "User id cannot be empty"))]
    pub user_id: String,

    #[serde(default)]
    pub scopes: Vec<String>,
}
