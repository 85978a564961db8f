//! # Error Handling
//!
//! Error types shared across the portal service, built with `thiserror`.
//!
//! - [`Error`] covers process-level failures (configuration, I/O, transport).
//! - [`ServiceError`] is what the backing portal services report back to the
//!   exposure layer; the HTTP boundary maps it onto `ApiError`.

mod service;

pub use service::{ResourceKind, ServiceError, ServiceResult};

/// Custom result type for portal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the portal service process
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network transport errors
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl From<config::ConfigError> for Error {
    fn from(error: config::ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Config(format!("Validation failed: {}", errors))
    }
}
