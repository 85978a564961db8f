//! API detail, picture, pages and plans.
//!
//! Every handler here first checks that the API is visible to the caller;
//! hidden and missing APIs both answer `errors.api.notFound`.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::instrument;

use crate::api::{
    access::assert_visible,
    assets::picture_response,
    dto::{Api, ApiIncludeQuery, Page, Plan},
    error::{ApiError, ErrorResponse},
    mappers::{convert_api, convert_page, convert_plan},
    pagination::{ListResponse, PaginationParam},
    routes::ApiState,
};
use crate::auth::Principal;
use crate::domain::{ApiId, PageEntity, PageId, PageQuery};
use crate::errors::ResourceKind;

#[utoipa::path(
    get,
    path = "/apis/{apiId}",
    params(
        ("apiId" = String, Path, description = "Id of the API"),
        ApiIncludeQuery
    ),
    responses(
        (status = 200, description = "API detail", body = Api),
        (status = 404, description = "API not found or not visible", body = ErrorResponse)
    ),
    tag = "APIs"
)]
#[instrument(skip(state, principal, include), fields(api_id = %api_id, user_id = ?principal.user_id()))]
pub async fn get_api_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(api_id): Path<String>,
    include: Result<axum_extra::extract::Query<ApiIncludeQuery>, axum_extra::extract::QueryRejection>,
) -> Result<Json<Api>, ApiError> {
    let api_id = ApiId::from(api_id);
    let axum_extra::extract::Query(include) = include?;

    assert_visible(state.apis.as_ref(), &api_id, &principal).await?;

    let entity = state.apis.find_by_id(&api_id).await?;
    let mut api = convert_api(&entity);

    if include.includes("pages") {
        let pages = published_pages(&state, &api_id).await?;
        api.pages = Some(pages.iter().map(|page| page_with_links(&state, &api_id, page)).collect());
    }
    if include.includes("plans") {
        api.plans = Some(published_plans(&state, &api_id).await?);
    }

    Ok(Json(api.with_links(state.links.api_links(&api_id))))
}

#[utoipa::path(
    get,
    path = "/apis/{apiId}/picture",
    params(("apiId" = String, Path, description = "Id of the API")),
    responses(
        (status = 200, description = "Picture bytes", content_type = "image/*"),
        (status = 304, description = "Client copy is current"),
        (status = 404, description = "API or picture not found", body = ErrorResponse)
    ),
    tag = "APIs"
)]
#[instrument(skip(state, principal, headers), fields(api_id = %api_id))]
pub async fn get_api_picture_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(api_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let api_id = ApiId::from(api_id);
    assert_visible(state.apis.as_ref(), &api_id, &principal).await?;

    let entity = state.apis.find_by_id(&api_id).await?;
    let picture = state.apis.get_picture(&api_id).await?;
    Ok(picture_response(&headers, picture, entity.updated_at))
}

#[utoipa::path(
    get,
    path = "/apis/{apiId}/pages",
    params(("apiId" = String, Path, description = "Id of the API"), PaginationParam),
    responses(
        (status = 200, description = "Published pages of the API", body = ListResponse<Page>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 404, description = "API not found or not visible", body = ErrorResponse)
    ),
    tag = "APIs"
)]
#[instrument(skip(state, principal, pagination), fields(api_id = %api_id))]
pub async fn list_api_pages_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(api_id): Path<String>,
    pagination: Result<Query<PaginationParam>, QueryRejection>,
) -> Result<Json<ListResponse<Page>>, ApiError> {
    let api_id = ApiId::from(api_id);
    let pagination = PaginationParam::from_query(pagination)?;
    assert_visible(state.apis.as_ref(), &api_id, &principal).await?;

    let pages: Vec<Page> = published_pages(&state, &api_id)
        .await?
        .iter()
        .map(|page| page_with_links(&state, &api_id, page))
        .collect();

    let path = format!("{}/pages", state.links.api_base(&api_id));
    Ok(Json(ListResponse::paginate(pages, pagination, &path)?))
}

#[utoipa::path(
    get,
    path = "/apis/{apiId}/pages/{pageId}",
    params(
        ("apiId" = String, Path, description = "Id of the API"),
        ("pageId" = String, Path, description = "Id of the page")
    ),
    responses(
        (status = 200, description = "Page", body = Page),
        (status = 404, description = "API or page not found", body = ErrorResponse)
    ),
    tag = "APIs"
)]
#[instrument(skip(state, principal), fields(api_id = %api_id, page_id = %page_id))]
pub async fn get_api_page_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path((api_id, page_id)): Path<(String, String)>,
) -> Result<Json<Page>, ApiError> {
    let api_id = ApiId::from(api_id);
    assert_visible(state.apis.as_ref(), &api_id, &principal).await?;

    let page = find_published_page(&state, &api_id, &PageId::from(page_id)).await?;
    Ok(Json(page_with_links(&state, &api_id, &page)))
}

#[utoipa::path(
    get,
    path = "/apis/{apiId}/pages/{pageId}/content",
    params(
        ("apiId" = String, Path, description = "Id of the API"),
        ("pageId" = String, Path, description = "Id of the page")
    ),
    responses(
        (status = 200, description = "Raw page content", content_type = "text/plain", body = String),
        (status = 404, description = "API or page not found", body = ErrorResponse)
    ),
    tag = "APIs"
)]
#[instrument(skip(state, principal), fields(api_id = %api_id, page_id = %page_id))]
pub async fn get_api_page_content_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path((api_id, page_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let api_id = ApiId::from(api_id);
    assert_visible(state.apis.as_ref(), &api_id, &principal).await?;

    let page = find_published_page(&state, &api_id, &PageId::from(page_id)).await?;
    let content = page.content.unwrap_or_default();
    Ok(([(CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())], content).into_response())
}

#[utoipa::path(
    get,
    path = "/apis/{apiId}/plans",
    params(("apiId" = String, Path, description = "Id of the API"), PaginationParam),
    responses(
        (status = 200, description = "Published plans of the API", body = ListResponse<Plan>),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 404, description = "API not found or not visible", body = ErrorResponse)
    ),
    tag = "APIs"
)]
#[instrument(skip(state, principal, pagination), fields(api_id = %api_id))]
pub async fn list_api_plans_handler(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    Path(api_id): Path<String>,
    pagination: Result<Query<PaginationParam>, QueryRejection>,
) -> Result<Json<ListResponse<Plan>>, ApiError> {
    let api_id = ApiId::from(api_id);
    let pagination = PaginationParam::from_query(pagination)?;
    assert_visible(state.apis.as_ref(), &api_id, &principal).await?;

    let plans = published_plans(&state, &api_id).await?;
    let path = format!("{}/plans", state.links.api_base(&api_id));
    Ok(Json(ListResponse::paginate(plans, pagination, &path)?))
}

async fn published_pages(state: &ApiState, api_id: &ApiId) -> Result<Vec<PageEntity>, ApiError> {
    Ok(state.pages.search(PageQuery::published_for_api(api_id)).await?)
}

async fn find_published_page(
    state: &ApiState,
    api_id: &ApiId,
    page_id: &PageId,
) -> Result<PageEntity, ApiError> {
    published_pages(state, api_id)
        .await?
        .into_iter()
        .find(|page| &page.id == page_id)
        .ok_or_else(|| ApiError::not_found(ResourceKind::Page, page_id.as_str()))
}

async fn published_plans(state: &ApiState, api_id: &ApiId) -> Result<Vec<Plan>, ApiError> {
    let plans = state.plans.find_by_api(api_id).await?;
    Ok(plans.iter().filter(|plan| plan.is_published()).map(convert_plan).collect())
}

fn page_with_links(state: &ApiState, api_id: &ApiId, page: &PageEntity) -> Page {
    let parent = page.parent_id.as_ref().map(|parent| parent.as_str());
    let links = state.links.api_page_links(api_id, page.id.as_str(), parent);
    convert_page(page).with_links(links)
}
