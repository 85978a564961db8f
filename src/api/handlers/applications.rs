//! Application resource: detail, update, delete, picture and secret renewal.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Extension, Json,
};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::api::{
    access::require_permission,
    assets::{picture_response, with_validators},
    dto::{Application, ApplicationInput},
    error::{ApiError, ErrorResponse},
    mappers::{convert_application, settings_from_input, update_from_input},
    routes::ApiState,
};
use crate::auth::{
    PermissionScope, Principal, RequiredPermission, RolePermission, RolePermissionAction,
};
use crate::domain::{ApplicationEntity, ApplicationId, UpdateApplicationEntity};
use crate::services::PictureError;

const READ_APPLICATION: RequiredPermission =
    RequiredPermission::new(RolePermission::ApplicationDefinition, RolePermissionAction::Read);
const UPDATE_APPLICATION: RequiredPermission =
    RequiredPermission::new(RolePermission::ApplicationDefinition, RolePermissionAction::Update);
const DELETE_APPLICATION: RequiredPermission =
    RequiredPermission::new(RolePermission::ApplicationDefinition, RolePermissionAction::Delete);

fn application_with_links(state: &ApiState, entity: &ApplicationEntity) -> Application {
    convert_application(entity).with_links(state.links.application_links(&entity.id))
}

#[utoipa::path(
    get,
    path = "/applications/{applicationId}",
    params(("applicationId" = String, Path, description = "Id of the application")),
    responses(
        (status = 200, description = "Application", body = Application),
        (status = 403, description = "Missing APPLICATION_DEFINITION[READ]", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal), fields(application_id = %application_id, user_id = ?principal.user_id()))]
pub async fn get_application_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
) -> Result<Json<Application>, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        READ_APPLICATION,
        PermissionScope::Application(&application_id),
    )?;

    let entity = state.applications.find_by_id(&application_id).await?;
    Ok(Json(application_with_links(&state, &entity)))
}

#[utoipa::path(
    put,
    path = "/applications/{applicationId}",
    params(("applicationId" = String, Path, description = "Id of the application")),
    request_body = ApplicationInput,
    responses(
        (status = 200, description = "Updated application", body = Application),
        (status = 400, description = "Invalid payload or id mismatch", body = ErrorResponse),
        (status = 403, description = "Missing permission or not the primary owner", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal, payload), fields(application_id = %application_id, user_id = ?principal.user_id()))]
pub async fn update_application_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
    payload: Result<Json<ApplicationInput>, JsonRejection>,
) -> Result<Json<Application>, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        UPDATE_APPLICATION,
        PermissionScope::Application(&application_id),
    )?;

    // Payload checks run before any service call
    let Json(input) = payload?;
    input.validate()?;
    if !input.id.eq_ignore_ascii_case(application_id.as_str()) {
        return Err(ApiError::bad_request(
            "'applicationId' is not the same that the application in payload",
        ));
    }
    let settings = settings_from_input(input.settings.as_ref())?;

    let current = state.applications.find_by_id(&application_id).await?;
    if !principal.is_user(&current.primary_owner) {
        warn!(owner = %current.primary_owner, "Update refused: caller is not the primary owner");
        return Err(ApiError::forbidden("Only the primary owner can update the application"));
    }

    let update = update_from_input(input, settings, &current);
    let updated = state.applications.update(&application_id, update).await?;

    info!("Updated application");
    Ok(Json(application_with_links(&state, &updated)))
}

#[utoipa::path(
    delete,
    path = "/applications/{applicationId}",
    params(("applicationId" = String, Path, description = "Id of the application")),
    responses(
        (status = 204, description = "Application archived"),
        (status = 403, description = "Missing APPLICATION_DEFINITION[DELETE]", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal), fields(application_id = %application_id, user_id = ?principal.user_id()))]
pub async fn delete_application_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        DELETE_APPLICATION,
        PermissionScope::Application(&application_id),
    )?;

    state.applications.archive(&application_id).await?;

    info!("Archived application");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/applications/{applicationId}/picture",
    params(("applicationId" = String, Path, description = "Id of the application")),
    responses(
        (status = 200, description = "Picture bytes", content_type = "image/*"),
        (status = 304, description = "Client copy is current"),
        (status = 403, description = "Missing APPLICATION_DEFINITION[READ]", body = ErrorResponse),
        (status = 404, description = "Application or picture not found", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal, headers), fields(application_id = %application_id))]
pub async fn get_application_picture_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        READ_APPLICATION,
        PermissionScope::Application(&application_id),
    )?;

    let entity = state.applications.find_by_id(&application_id).await?;
    let picture = state.applications.get_picture(&application_id).await?;
    Ok(picture_response(&headers, picture, entity.updated_at))
}

#[utoipa::path(
    put,
    path = "/applications/{applicationId}/picture",
    params(("applicationId" = String, Path, description = "Id of the application")),
    request_body(content = String, description = "Picture as a base64 data URI", content_type = "text/plain"),
    responses(
        (status = 200, description = "Application with its new picture", body = Application),
        (status = 403, description = "Missing APPLICATION_DEFINITION[UPDATE]", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 422, description = "Invalid picture", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal, body), fields(application_id = %application_id, picture_bytes = body.len()))]
pub async fn update_application_picture_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        UPDATE_APPLICATION,
        PermissionScope::Application(&application_id),
    )?;

    let raw = std::str::from_utf8(&body).map_err(|_| PictureError::NotADataUri)?;
    let picture = state.pictures.check_and_scale(raw)?;

    let current = state.applications.find_by_id(&application_id).await?;
    let update = UpdateApplicationEntity {
        picture: Some(picture),
        ..UpdateApplicationEntity::carry_forward(&current)
    };
    let updated = state.applications.update(&application_id, update).await?;

    info!("Updated application picture");
    Ok(with_validators(Json(application_with_links(&state, &updated)), updated.updated_at))
}

#[utoipa::path(
    post,
    path = "/applications/{applicationId}/_renew_secret",
    params(("applicationId" = String, Path, description = "Id of the application")),
    responses(
        (status = 200, description = "Application with a new client secret", body = Application),
        (status = 400, description = "Application does not support secret renewal", body = ErrorResponse),
        (status = 403, description = "Missing APPLICATION_DEFINITION[UPDATE]", body = ErrorResponse),
        (status = 404, description = "Application not found", body = ErrorResponse)
    ),
    tag = "Applications"
)]
#[instrument(skip(state, principal), fields(application_id = %application_id, user_id = ?principal.user_id()))]
pub async fn renew_application_secret_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
) -> Result<Json<Application>, ApiError> {
    let application_id = ApplicationId::from(application_id);
    require_permission(
        state.permissions.as_ref(),
        &principal,
        UPDATE_APPLICATION,
        PermissionScope::Application(&application_id),
    )?;

    let renewed = state.applications.renew_client_secret(&application_id).await?;

    info!("Renewed application client secret");
    Ok(Json(application_with_links(&state, &renewed)))
}
