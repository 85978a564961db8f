//! Domain layer
//!
//! Entities owned by the backing portal services. The exposure layer never
//! mutates them in place: it reads them, maps them into public representations,
//! or builds the update/creation payloads the services accept.
//!
//! ## Module Organization
//!
//! - `id`: Type-safe domain identifiers with NewType pattern
//! - `api`, `application`, `page`, `plan`, `rating`: service entities
//! - `picture`: decoded inline pictures
//! - `paging`: page requests and already-paginated results

pub mod api;
pub mod application;
pub mod id;
pub mod page;
pub mod paging;
pub mod picture;
pub mod plan;
pub mod rating;

pub use api::{ApiEntity, ApiLifecycleState, ApiState, Visibility};
pub use application::{
    AnalyticsQuery, AnalyticsType, ApplicationEntity, ApplicationLogEntity, ApplicationSettings,
    MemberEntity, NotificationSettingEntity, OAuthClientSettings, SimpleApplicationSettings,
    UpdateApplicationEntity,
};
pub use id::{ApiId, ApplicationId, PageId, PlanId, RatingId, UserId};
pub use page::{PageEntity, PageQuery};
pub use paging::{Pageable, PagedResult};
pub use picture::InlinePicture;
pub use plan::{PlanEntity, PlanSecurityType, PlanStatus, PlanValidationType};
pub use rating::{NewRatingEntity, RatingEntity, MAX_RATE, MIN_RATE};
