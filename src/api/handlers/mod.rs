//! HTTP handlers for the portal resources.

pub mod application_subresources;
pub mod applications;
pub mod apis;
pub mod health;
pub mod ratings;

pub use application_subresources::{
    application_sub_resources_router, get_application_analytics_handler,
    get_application_notifications_handler, list_application_logs_handler,
    list_application_members_handler, AnalyticsParam, APPLICATION_SUB_RESOURCES,
};
pub use applications::{
    delete_application_handler, get_application_handler, get_application_picture_handler,
    renew_application_secret_handler, update_application_handler,
    update_application_picture_handler,
};
pub use apis::{
    get_api_handler, get_api_page_content_handler, get_api_page_handler, get_api_picture_handler,
    list_api_pages_handler, list_api_plans_handler,
};
pub use health::{health_handler, HealthResponse};
pub use ratings::{create_api_rating_handler, list_api_ratings_handler};
