//! Application sub-resources: members, notifications, logs and analytics.
//!
//! Each sub-resource contributes its own router; [`APPLICATION_SUB_RESOURCES`]
//! maps the path segment under `/applications/{applicationId}` to it.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

use crate::api::{
    access::require_permission,
    dto::{Log, Member, NotificationSetting},
    error::{ApiError, ErrorResponse},
    mappers::{convert_log, convert_member, convert_notification_setting},
    pagination::{ListResponse, PaginationParam},
    routes::ApiState,
};
use crate::auth::{
    PermissionScope, Principal, RequiredPermission, RolePermission, RolePermissionAction,
};
use crate::domain::{AnalyticsQuery, AnalyticsType, ApplicationId};

/// Builds the router mounted under one sub-resource segment.
pub type SubResourceRouter = fn() -> Router<ApiState>;

pub const APPLICATION_SUB_RESOURCES: &[(&str, SubResourceRouter)] = &[
    ("members", members_router),
    ("notifications", notifications_router),
    ("logs", logs_router),
    ("analytics", analytics_router),
];

/// Every sub-resource nested under `/applications/{applicationId}/<segment>`.
pub fn application_sub_resources_router() -> Router<ApiState> {
    APPLICATION_SUB_RESOURCES.iter().fold(Router::new(), |router, (segment, build)| {
        router.nest(&format!("/applications/{{applicationId}}/{}", segment), build())
    })
}

fn members_router() -> Router<ApiState> {
    Router::new().route("/", get(list_application_members_handler))
}

fn notifications_router() -> Router<ApiState> {
    Router::new().route("/", get(get_application_notifications_handler))
}

fn logs_router() -> Router<ApiState> {
    Router::new().route("/", get(list_application_logs_handler))
}

fn analytics_router() -> Router<ApiState> {
    Router::new().route("/", get(get_application_analytics_handler))
}

fn read(resource: RolePermission) -> RequiredPermission {
    RequiredPermission::new(resource, RolePermissionAction::Read)
}

#[utoipa::path(
    get,
    path = "/applications/{applicationId}/members",
    params(("applicationId" = String, Path, description = "Id of the application"), PaginationParam),
    responses(
        (status = 200, description = "Members of the application", body = ListResponse<Member>),
        (status = 403, description = "Missing APPLICATION_MEMBER[READ]", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal, pagination), fields(application_id = %application_id))]
pub async fn list_application_members_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
    pagination: Result<Query<PaginationParam>, QueryRejection>,
) -> Result<Json<ListResponse<Member>>, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        read(RolePermission::ApplicationMember),
        PermissionScope::Application(&application_id),
    )?;
    let pagination = PaginationParam::from_query(pagination)?;

    let page = state.applications.find_members(&application_id, pagination.to_pageable()?).await?;
    let path = format!("{}/members", state.links.application_base(&application_id));
    Ok(Json(ListResponse::from_page(page, pagination, &path, |member| convert_member(&member))?))
}

#[utoipa::path(
    get,
    path = "/applications/{applicationId}/notifications",
    params(("applicationId" = String, Path, description = "Id of the application")),
    responses(
        (status = 200, description = "Notification settings", body = [NotificationSetting]),
        (status = 403, description = "Missing APPLICATION_NOTIFICATION[READ]", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal), fields(application_id = %application_id))]
pub async fn get_application_notifications_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
) -> Result<Json<Vec<NotificationSetting>>, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        read(RolePermission::ApplicationNotification),
        PermissionScope::Application(&application_id),
    )?;

    let settings = state.applications.notification_settings(&application_id).await?;
    Ok(Json(settings.iter().map(convert_notification_setting).collect()))
}

#[utoipa::path(
    get,
    path = "/applications/{applicationId}/logs",
    params(("applicationId" = String, Path, description = "Id of the application"), PaginationParam),
    responses(
        (status = 200, description = "Requests made by the application", body = ListResponse<Log>),
        (status = 403, description = "Missing APPLICATION_LOG[READ]", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal, pagination), fields(application_id = %application_id))]
pub async fn list_application_logs_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
    pagination: Result<Query<PaginationParam>, QueryRejection>,
) -> Result<Json<ListResponse<Log>>, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        read(RolePermission::ApplicationLog),
        PermissionScope::Application(&application_id),
    )?;
    let pagination = PaginationParam::from_query(pagination)?;

    let page = state.applications.search_logs(&application_id, pagination.to_pageable()?).await?;
    let path = format!("{}/logs", state.links.application_base(&application_id));
    Ok(Json(ListResponse::from_page(page, pagination, &path, |log| convert_log(&log))?))
}

/// `?type=&from=&to=&interval=&field=` parameters of the analytics endpoint.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "validate_time_range"))]
pub struct AnalyticsParam {
    /// COUNT, DATE_HISTO or GROUP_BY
    #[serde(rename = "type")]
    #[param(value_type = String)]
    pub analytics_type: AnalyticsType,
    /// Start of the range, epoch millis
    pub from: i64,
    /// End of the range, epoch millis
    pub to: i64,
    /// Bucket width in millis
    #[validate(range(min = 1_000, max = 1_000_000_000))]
    pub interval: i64,
    /// Field aggregated by GROUP_BY
    #[serde(default)]
    pub field: Option<String>,
}

fn validate_time_range(param: &AnalyticsParam) -> Result<(), ValidationError> {
    if param.from > param.to {
        return Err(ValidationError::new("from_after_to"));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/applications/{applicationId}/analytics",
    params(("applicationId" = String, Path, description = "Id of the application"), AnalyticsParam),
    responses(
        (status = 200, description = "Aggregated analytics"),
        (status = 400, description = "Invalid analytics query", body = ErrorResponse),
        (status = 403, description = "Missing APPLICATION_ANALYTICS[READ]", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal, params), fields(application_id = %application_id))]
pub async fn get_application_analytics_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
    params: Result<Query<AnalyticsParam>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        read(RolePermission::ApplicationAnalytics),
        PermissionScope::Application(&application_id),
    )?;

    let Query(params) = params?;
    params.validate()?;

    let query = AnalyticsQuery {
        analytics_type: params.analytics_type,
        from: params.from,
        to: params.to,
        interval: params.interval,
        field: params.field,
    };
    Ok(Json(state.applications.analytics(&application_id, query).await?))
}
