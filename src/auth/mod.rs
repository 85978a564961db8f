//! Authentication and authorization module entry point.
//!
//! Identity resolution produces a [`Principal`] for every request; the
//! [`PermissionGuard`] decides whether that principal may run a guarded
//! operation.

pub mod authorization;
pub mod identity;
pub mod middleware;
pub mod models;

pub use authorization::{
    PermissionGuard, PermissionScope, RequiredPermission, RolePermission, RolePermissionAction,
    ScopePermissionGuard,
};
pub use identity::{IdentityProvider, StaticTokenIdentityProvider};
pub use models::{AuthError, Principal};
