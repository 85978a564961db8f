//! Visibility filtering and permission gating for handlers.

use std::collections::HashSet;

use tracing::debug;

use crate::api::error::ApiError;
use crate::auth::{PermissionGuard, PermissionScope, Principal, RequiredPermission};
use crate::domain::ApiId;
use crate::errors::ResourceKind;
use crate::observability::MetricsRecorder;
use crate::services::ApiService;

/// Ids of the APIs the principal may see.
pub async fn visible_apis(
    apis: &dyn ApiService,
    principal: &Principal,
) -> Result<HashSet<ApiId>, ApiError> {
    let visible = apis.find_published_by_user(principal.user_id()).await?;
    Ok(visible.into_iter().collect())
}

/// Fail with `errors.api.notFound` unless `api` is visible to the principal.
///
/// Missing and hidden APIs are indistinguishable to the caller.
pub async fn assert_visible(
    apis: &dyn ApiService,
    api: &ApiId,
    principal: &Principal,
) -> Result<(), ApiError> {
    if visible_apis(apis, principal).await?.contains(api) {
        Ok(())
    } else {
        debug!(api_id = %api, user_id = ?principal.user_id(), "API not visible to caller");
        Err(ApiError::not_found(ResourceKind::Api, api.as_str()))
    }
}

/// Run the permission gate for a guarded operation.
pub fn require_permission(
    guard: &dyn PermissionGuard,
    principal: &Principal,
    required: RequiredPermission,
    scope: PermissionScope<'_>,
) -> Result<(), ApiError> {
    guard.check(principal, required, scope).map_err(|err| {
        debug!(
            permission = %required,
            user_id = ?principal.user_id(),
            "Permission denied"
        );
        MetricsRecorder::new().record_permission_denied(&required.to_string());
        ApiError::from(err)
    })
}
