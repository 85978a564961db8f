use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, warn};

use crate::api::links::LinkComputer;
use crate::auth::{
    middleware::{authenticate, IdentityState},
    PermissionGuard, ScopePermissionGuard,
};
use crate::config::ServerConfig;
use crate::observability::http_tracing::trace_http_requests;
use crate::services::{
    ApiService, ApplicationService, DataUriPictureProcessor, InMemoryPortal, PageService,
    PictureProcessor, PlanService, RatingService,
};

use super::{
    docs,
    handlers::{
        application_sub_resources_router, create_api_rating_handler, delete_application_handler,
        get_api_handler, get_api_page_content_handler, get_api_page_handler,
        get_api_picture_handler, get_application_handler, get_application_picture_handler,
        health_handler, list_api_pages_handler, list_api_plans_handler, list_api_ratings_handler,
        renew_application_secret_handler, update_application_handler,
        update_application_picture_handler,
    },
};

/// Collaborators shared by every handler.
#[derive(Clone)]
pub struct ApiState {
    pub apis: Arc<dyn ApiService>,
    pub applications: Arc<dyn ApplicationService>,
    pub ratings: Arc<dyn RatingService>,
    pub pages: Arc<dyn PageService>,
    pub plans: Arc<dyn PlanService>,
    pub permissions: Arc<dyn PermissionGuard>,
    pub pictures: Arc<dyn PictureProcessor>,
    pub links: LinkComputer,
}

impl ApiState {
    /// State backed entirely by one in-memory portal, with the default guard
    /// and picture processor.
    pub fn from_portal(portal: Arc<InMemoryPortal>, base_path: &str) -> Self {
        Self {
            apis: portal.clone(),
            applications: portal.clone(),
            ratings: portal.clone(),
            pages: portal.clone(),
            plans: portal,
            permissions: Arc::new(ScopePermissionGuard),
            pictures: Arc::new(DataUriPictureProcessor::default()),
            links: LinkComputer::new(base_path),
        }
    }

    pub fn with_permissions(mut self, permissions: Arc<dyn PermissionGuard>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_pictures(mut self, pictures: Arc<dyn PictureProcessor>) -> Self {
        self.pictures = pictures;
        self
    }
}

fn resource_routes() -> Router<ApiState> {
    Router::new()
        .route("/apis/{apiId}", get(get_api_handler))
        .route("/apis/{apiId}/picture", get(get_api_picture_handler))
        .route("/apis/{apiId}/pages", get(list_api_pages_handler))
        .route("/apis/{apiId}/pages/{pageId}", get(get_api_page_handler))
        .route("/apis/{apiId}/pages/{pageId}/content", get(get_api_page_content_handler))
        .route("/apis/{apiId}/plans", get(list_api_plans_handler))
        .route(
            "/apis/{apiId}/ratings",
            get(list_api_ratings_handler).post(create_api_rating_handler),
        )
        .route(
            "/applications/{applicationId}",
            get(get_application_handler)
                .put(update_application_handler)
                .delete(delete_application_handler),
        )
        .route(
            "/applications/{applicationId}/picture",
            get(get_application_picture_handler).put(update_application_picture_handler),
        )
        .route(
            "/applications/{applicationId}/_renew_secret",
            post(renew_application_secret_handler),
        )
        .merge(application_sub_resources_router())
}

/// Portal resources mounted under the link base path, plus health and docs.
pub fn build_router(state: ApiState, identity: IdentityState) -> Router {
    let base_path = state.links.base_path().to_string();

    let secured = resource_routes()
        .with_state(state)
        .layer(middleware::from_fn_with_state(identity, authenticate));

    let mounted = if base_path.is_empty() {
        Router::new().merge(secured)
    } else {
        Router::new().nest(&base_path, secured)
    };

    mounted.route("/health", get(health_handler)).merge(docs::docs_router())
}

/// [`build_router`] wrapped with the HTTP layers driven by configuration.
pub fn build_router_with_config(
    state: ApiState,
    identity: IdentityState,
    config: &ServerConfig,
) -> Router {
    let router = build_router(state, identity)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(middleware::from_fn(trace_http_requests))
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router.layer(build_cors_layer(&config.cors_origins))
    } else {
        router
    }
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        debug!("Enabling permissive CORS");
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
