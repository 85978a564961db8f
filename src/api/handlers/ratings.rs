//! Ratings of an API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::api::{
    access::{assert_visible, require_permission},
    dto::{Rating, RatingInput},
    error::{ApiError, ErrorResponse},
    mappers::convert_rating,
    pagination::{ListResponse, PaginationParam},
    routes::ApiState,
};
use crate::auth::{
    AuthError, PermissionScope, Principal, RequiredPermission, RolePermission,
    RolePermissionAction,
};
use crate::domain::{ApiId, NewRatingEntity};

const CREATE_RATING: RequiredPermission =
    RequiredPermission::new(RolePermission::ApiRating, RolePermissionAction::Create);

#[utoipa::path(
    get,
    path = "/apis/{apiId}/ratings",
    params(("apiId" = String, Path, description = "Id of the API"), PaginationParam),
    responses(
        (status = 200, description = "Ratings of the API", body = ListResponse<Rating>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 404, description = "API not found or not visible", body = ErrorResponse)
    ),
    tag = "Ratings"
)]
#[instrument(skip(state, principal, pagination), fields(api_id = %api_id, user_id = ?principal.user_id()))]
pub async fn list_api_ratings_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(api_id): Path<String>,
    pagination: Result<Query<PaginationParam>, QueryRejection>,
) -> Result<Json<ListResponse<Rating>>, ApiError> {
    let api_id = ApiId::from(api_id);
    let pagination = PaginationParam::from_query(pagination)?;

    assert_visible(state.apis.as_ref(), &api_id, &principal).await?;

    // The rating service paginates; its page is passed through as is
    let page = state.ratings.find_by_api(&api_id, pagination.to_pageable()?).await?;
    let path = format!("{}/ratings", state.links.api_base(&api_id));
    let response = ListResponse::from_page(page, pagination, &path, |rating| {
        convert_rating(&rating).with_links(state.links.rating_links(&api_id, &rating.id))
    })?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/apis/{apiId}/ratings",
    params(("apiId" = String, Path, description = "Id of the API")),
    request_body = RatingInput,
    responses(
        (status = 201, description = "Rating created", body = Rating),
        (status = 400, description = "Invalid rating", body = ErrorResponse),
        (status = 403, description = "Missing API_RATING[CREATE]", body = ErrorResponse),
        (status = 404, description = "API not found or not visible", body = ErrorResponse)
    ),
    tag = "Ratings"
)]
#[instrument(skip(state, principal, payload), fields(api_id = %api_id, user_id = ?principal.user_id()))]
pub async fn create_api_rating_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(api_id): Path<String>,
    payload: Result<Json<RatingInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Rating>), ApiError> {
    let api_id = ApiId::from(api_id);

    require_permission(
        state.permissions.as_ref(),
        &principal,
        CREATE_RATING,
        PermissionScope::Api(&api_id),
    )?;

    let Json(input) = payload?;
    input.validate()?;
    let rate = input
        .value
        .and_then(|value| u8::try_from(value).ok())
        .ok_or_else(|| ApiError::bad_request("Rating value is required"))?;

    assert_visible(state.apis.as_ref(), &api_id, &principal).await?;

    let user = principal.user_id().cloned().ok_or(AuthError::AuthenticationRequired)?;
    let created = state
        .ratings
        .create(NewRatingEntity {
            api: api_id.clone(),
            user,
            title: input.title,
            comment: input.comment,
            rate,
        })
        .await?;

    info!(rating_id = %created.id, rate = created.rate, "Created API rating");
    let links = state.links.rating_links(&api_id, &created.id);
    Ok((StatusCode::CREATED, Json(convert_rating(&created).with_links(links))))
}
