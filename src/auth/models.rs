//! Caller identity threaded through every portal handler.

use std::collections::HashSet;

use thiserror::Error;

use crate::domain::UserId;

/// Request-scoped identity of the caller.
///
/// Portal reads are allowed anonymously, so a principal may carry no user. The
/// scopes are the caller's role bindings flattened to strings; only the
/// [`PermissionGuard`](crate::auth::authorization::PermissionGuard) interprets
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    user_id: Option<UserId>,
    scopes: HashSet<String>,
}

impl Principal {
    /// Caller that presented no credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: UserId, scopes: Vec<String>) -> Self {
        Self { user_id: Some(user_id), scopes: scopes.into_iter().collect() }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// True when the caller is the given user.
    pub fn is_user(&self, user: &UserId) -> bool {
        self.user_id.as_ref() == Some(user)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    pub fn scopes(&self) -> impl Iterator<Item = &String> {
        self.scopes.iter()
    }
}

/// Errors returned by authentication middleware and permission checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("unauthorized: malformed bearer token")]
    MalformedBearer,
    #[error("unauthorized: token not found")]
    TokenNotFound,
    #[error("unauthorized: authentication required")]
    AuthenticationRequired,
    #[error("forbidden: missing required permission")]
    Forbidden,
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}
