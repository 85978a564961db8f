use axum::Router;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Portal REST API", description = "Public portal surface for APIs and applications"),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::apis::get_api_handler,
        crate::api::handlers::apis::get_api_picture_handler,
        crate::api::handlers::apis::list_api_pages_handler,
        crate::api::handlers::apis::get_api_page_handler,
        crate::api::handlers::apis::get_api_page_content_handler,
        crate::api::handlers::apis::list_api_plans_handler,
        crate::api::handlers::ratings::list_api_ratings_handler,
        crate::api::handlers::ratings::create_api_rating_handler,
        crate::api::handlers::applications::get_application_handler,
        crate::api::handlers::applications::update_application_handler,
        crate::api::handlers::applications::delete_application_handler,
        crate::api::handlers::applications::get_application_picture_handler,
        crate::api::handlers::applications::update_application_picture_handler,
        crate::api::handlers::applications::renew_application_secret_handler,
        crate::api::handlers::application_subresources::list_application_members_handler,
        crate::api::handlers::application_subresources::get_application_notifications_handler,
        crate::api::handlers::application_subresources::list_application_logs_handler,
        crate::api::handlers::application_subresources::get_application_analytics_handler
    ),
    components(
        schemas(
            crate::api::handlers::health::HealthResponse,
            crate::api::error::ErrorResponse,
            crate::api::error::ErrorEntry,
            crate::api::dto::Api,
            crate::api::dto::ApiLinks,
            crate::api::dto::Application,
            crate::api::dto::ApplicationInput,
            crate::api::dto::ApplicationLinks,
            crate::api::dto::ApplicationSettings,
            crate::api::dto::SimpleApplicationSettings,
            crate::api::dto::OAuthClientSettings,
            crate::api::dto::Page,
            crate::api::dto::PageConfiguration,
            crate::api::dto::PageLinks,
            crate::api::dto::Metadata,
            crate::api::dto::Plan,
            crate::api::dto::Rating,
            crate::api::dto::RatingInput,
            crate::api::dto::RatingLinks,
            crate::api::dto::Member,
            crate::api::dto::NotificationSetting,
            crate::api::dto::Log,
            crate::api::pagination::PaginationMetadata,
            crate::api::pagination::ListLinks
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "APIs", description = "Published APIs with their pages, plans and pictures"),
        (name = "Ratings", description = "User ratings of APIs"),
        (name = "Applications", description = "Subscriber applications and their sub-resources")
    ),
    security(
        ("bearerAuth" = [])
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

pub fn docs_router() -> Router {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()).into()
}
