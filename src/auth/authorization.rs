//! Permission gate for portal operations.
//!
//! Every guarded operation declares the [`RequiredPermission`] it needs as a
//! plain value and hands it to a [`PermissionGuard`] together with the caller
//! and the entity the permission is bound to. The guard's verdict is final.
//!
//! The default [`ScopePermissionGuard`] evaluates scope strings:
//! - `admin:all` - bypass every check
//! - `{resource}:{action}` - environment-wide role (e.g. `application_definition:read`)
//! - `{kind}:{id}:{resource}:{action}` - role bound to one entity
//!   (e.g. `application:app-1:application_definition:update`)

use std::fmt;

use crate::auth::models::{AuthError, Principal};
use crate::domain::{ApiId, ApplicationId};

/// Admin bypass scope that grants every permission.
pub const ADMIN_ALL_SCOPE: &str = "admin:all";

/// Resource types a role can grant access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RolePermission {
    ApiRating,
    ApplicationDefinition,
    ApplicationMember,
    ApplicationNotification,
    ApplicationLog,
    ApplicationAnalytics,
}

impl RolePermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            RolePermission::ApiRating => "api_rating",
            RolePermission::ApplicationDefinition => "application_definition",
            RolePermission::ApplicationMember => "application_member",
            RolePermission::ApplicationNotification => "application_notification",
            RolePermission::ApplicationLog => "application_log",
            RolePermission::ApplicationAnalytics => "application_analytics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RolePermissionAction {
    Create,
    Read,
    Update,
    Delete,
}

impl RolePermissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RolePermissionAction::Create => "create",
            RolePermissionAction::Read => "read",
            RolePermissionAction::Update => "update",
            RolePermissionAction::Delete => "delete",
        }
    }
}

/// (resource-type, action) pair an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequiredPermission {
    pub resource: RolePermission,
    pub action: RolePermissionAction,
}

impl RequiredPermission {
    pub const fn new(resource: RolePermission, action: RolePermissionAction) -> Self {
        Self { resource, action }
    }
}

impl fmt::Display for RequiredPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource.as_str(), self.action.as_str())
    }
}

/// Entity a permission is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionScope<'a> {
    Environment,
    Api(&'a ApiId),
    Application(&'a ApplicationId),
}

impl PermissionScope<'_> {
    fn bound_prefix(&self) -> Option<String> {
        match self {
            PermissionScope::Environment => None,
            PermissionScope::Api(id) => Some(format!("api:{}", id)),
            PermissionScope::Application(id) => Some(format!("application:{}", id)),
        }
    }
}

/// Black-box role/action authorization consulted before guarded operations.
pub trait PermissionGuard: Send + Sync {
    /// Allow (`Ok`) or deny (`Err(AuthError::Forbidden)`) the operation.
    fn check(
        &self,
        principal: &Principal,
        required: RequiredPermission,
        scope: PermissionScope<'_>,
    ) -> Result<(), AuthError>;
}

/// Check if the principal has admin bypass privileges.
///
/// ```rust
/// use portal_rest::auth::authorization::has_admin_bypass;
/// use portal_rest::auth::models::Principal;
/// use portal_rest::domain::UserId;
///
/// let admin = Principal::authenticated(UserId::from("admin"), vec!["admin:all".into()]);
/// assert!(has_admin_bypass(&admin));
/// assert!(!has_admin_bypass(&Principal::anonymous()));
/// ```
pub fn has_admin_bypass(principal: &Principal) -> bool {
    principal.has_scope(ADMIN_ALL_SCOPE)
}

/// Check if the principal holds `required` for `scope`.
///
/// Anonymous principals never hold a permission. Otherwise the order is:
/// 1. Admin bypass (`admin:all`)
/// 2. Environment-wide permission (`{resource}:{action}`)
/// 3. Entity-bound permission (`{kind}:{id}:{resource}:{action}`)
///
/// ```rust
/// use portal_rest::auth::authorization::{
///     check_permission, PermissionScope, RequiredPermission, RolePermission,
///     RolePermissionAction,
/// };
/// use portal_rest::auth::models::Principal;
/// use portal_rest::domain::{ApplicationId, UserId};
///
/// let principal = Principal::authenticated(
///     UserId::from("user-1"),
///     vec!["application:app-1:application_definition:update".into()],
/// );
/// let update = RequiredPermission::new(
///     RolePermission::ApplicationDefinition,
///     RolePermissionAction::Update,
/// );
///
/// let app_1 = ApplicationId::from("app-1");
/// let app_2 = ApplicationId::from("app-2");
/// assert!(check_permission(&principal, update, PermissionScope::Application(&app_1)));
/// assert!(!check_permission(&principal, update, PermissionScope::Application(&app_2)));
/// ```
pub fn check_permission(
    principal: &Principal,
    required: RequiredPermission,
    scope: PermissionScope<'_>,
) -> bool {
    if !principal.is_authenticated() {
        return false;
    }

    if has_admin_bypass(principal) {
        return true;
    }

    let permission = required.to_string();
    if principal.has_scope(&permission) {
        return true;
    }

    if let Some(prefix) = scope.bound_prefix() {
        let bound = format!("{}:{}", prefix, permission);
        if principal.has_scope(&bound) {
            return true;
        }
    }

    false
}

/// Scope-string implementation of [`PermissionGuard`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopePermissionGuard;

impl PermissionGuard for ScopePermissionGuard {
    fn check(
        &self,
        principal: &Principal,
        required: RequiredPermission,
        scope: PermissionScope<'_>,
    ) -> Result<(), AuthError> {
        if check_permission(principal, required, scope) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    const READ_APP: RequiredPermission =
        RequiredPermission::new(RolePermission::ApplicationDefinition, RolePermissionAction::Read);
    const CREATE_RATING: RequiredPermission =
        RequiredPermission::new(RolePermission::ApiRating, RolePermissionAction::Create);

    fn principal(scopes: &[&str]) -> Principal {
        Principal::authenticated(
            UserId::from("user-1"),
            scopes.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_required_permission_display() {
        assert_eq!(READ_APP.to_string(), "application_definition:read");
        assert_eq!(CREATE_RATING.to_string(), "api_rating:create");
    }

    #[test]
    fn test_anonymous_is_always_denied() {
        let guard = ScopePermissionGuard;
        let result = guard.check(&Principal::anonymous(), READ_APP, PermissionScope::Environment);
        assert_eq!(result, Err(AuthError::Forbidden));
    }

    #[test]
    fn test_admin_bypass() {
        let api = ApiId::from("api-1");
        assert!(check_permission(&principal(&["admin:all"]), CREATE_RATING, PermissionScope::Api(&api)));
    }

    #[test]
    fn test_environment_wide_permission_applies_to_any_entity() {
        let app = ApplicationId::from("anything");
        let p = principal(&["application_definition:read"]);
        assert!(check_permission(&p, READ_APP, PermissionScope::Application(&app)));
        assert!(check_permission(&p, READ_APP, PermissionScope::Environment));
    }

    #[test]
    fn test_bound_permission_only_applies_to_its_entity() {
        let api_1 = ApiId::from("api-1");
        let api_2 = ApiId::from("api-2");
        let p = principal(&["api:api-1:api_rating:create"]);
        assert!(check_permission(&p, CREATE_RATING, PermissionScope::Api(&api_1)));
        assert!(!check_permission(&p, CREATE_RATING, PermissionScope::Api(&api_2)));
        assert!(!check_permission(&p, CREATE_RATING, PermissionScope::Environment));
    }

    #[test]
    fn test_bound_permission_does_not_leak_across_kinds() {
        let app = ApplicationId::from("shared-id");
        let p = principal(&["api:shared-id:application_definition:read"]);
        assert!(!check_permission(&p, READ_APP, PermissionScope::Application(&app)));
    }

    #[test]
    fn test_action_mismatch_is_denied() {
        let p = principal(&["application_definition:read"]);
        let update = RequiredPermission::new(
            RolePermission::ApplicationDefinition,
            RolePermissionAction::Update,
        );
        assert!(!check_permission(&p, update, PermissionScope::Environment));
    }
}
