//! Public representations served by the portal.

pub mod api;
pub mod application;
pub mod links;
pub mod page;
pub mod plan;
pub mod rating;

pub use api::{Api, ApiIncludeQuery};
pub use application::{
    Application, ApplicationInput, ApplicationSettings, Log, Member, NotificationSetting,
    OAuthClientSettings, SimpleApplicationSettings,
};
pub use links::{ApiLinks, ApplicationLinks, PageLinks, RatingLinks};
pub use page::{DocExpansion, Metadata, Page, PageConfiguration, PageContent, PageType, Viewer};
pub use plan::Plan;
pub use rating::{Rating, RatingInput};
