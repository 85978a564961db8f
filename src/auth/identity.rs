//! Resolution of bearer credentials into a [`Principal`].
//!
//! Authentication itself happens upstream of the portal; this module only maps
//! an already-issued token onto the caller identity and role bindings.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::auth::models::{AuthError, Principal};
use crate::config::StaticTokenConfig;
use crate::domain::UserId;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token (without the `Bearer ` prefix).
    async fn resolve(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Identity provider backed by a fixed token table from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenIdentityProvider {
    principals: HashMap<String, Principal>,
}

impl StaticTokenIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(tokens: &[StaticTokenConfig]) -> Self {
        tokens.iter().fold(Self::new(), |provider, entry| {
            provider.with_token(&entry.token, UserId::from(entry.user_id.as_str()), entry.scopes.clone())
        })
    }

    pub fn with_token(mut self, token: &str, user_id: UserId, scopes: Vec<String>) -> Self {
        self.principals.insert(token.to_string(), Principal::authenticated(user_id, scopes));
        self
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Principal, AuthError> {
        self.principals.get(token).cloned().ok_or(AuthError::TokenNotFound)
    }
}
