//! Errors reported by the backing portal services.

use std::fmt;

/// Result type returned by every collaborator trait in `crate::services`
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Kind of entity a [`ServiceError::NotFound`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Api,
    Application,
    Page,
    Plan,
    Rating,
    Picture,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Api => "api",
            ResourceKind::Application => "application",
            ResourceKind::Page => "page",
            ResourceKind::Plan => "plan",
            ResourceKind::Rating => "rating",
            ResourceKind::Picture => "picture",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The entity does not exist
    #[error("{kind} [{id}] can not be found")]
    NotFound { kind: ResourceKind, id: String },

    /// The service rejected the payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// The service refused the operation for the calling user
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The entity already exists (e.g. a second rating by the same user)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The service could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
