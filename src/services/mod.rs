//! Collaborator services consumed by the exposure layer.
//!
//! Persistence and business rules for APIs, applications, ratings, pages and
//! plans live behind these traits. Handlers hold them as
//! `Arc<dyn Trait>` and never cache or mutate their results.

pub mod memory;
pub mod picture;

use async_trait::async_trait;

use crate::domain::{
    AnalyticsQuery, ApiEntity, ApiId, ApplicationEntity, ApplicationId, ApplicationLogEntity,
    InlinePicture, MemberEntity, NewRatingEntity, NotificationSettingEntity, PageEntity,
    PageQuery, Pageable, PagedResult, PlanEntity, RatingEntity, UpdateApplicationEntity, UserId,
};
use crate::errors::ServiceResult;

pub use memory::InMemoryPortal;
pub use picture::{DataUriPictureProcessor, PictureError, PictureProcessor};

#[async_trait]
pub trait ApiService: Send + Sync {
    /// Ids of the APIs the user (or an anonymous caller when `None`) may see.
    async fn find_published_by_user(&self, user: Option<&UserId>) -> ServiceResult<Vec<ApiId>>;

    async fn find_by_id(&self, api: &ApiId) -> ServiceResult<ApiEntity>;

    async fn get_picture(&self, api: &ApiId) -> ServiceResult<InlinePicture>;
}

#[async_trait]
pub trait ApplicationService: Send + Sync {
    async fn find_by_id(&self, application: &ApplicationId) -> ServiceResult<ApplicationEntity>;

    async fn update(
        &self,
        application: &ApplicationId,
        update: UpdateApplicationEntity,
    ) -> ServiceResult<ApplicationEntity>;

    /// Soft delete; archived applications are no longer returned.
    async fn archive(&self, application: &ApplicationId) -> ServiceResult<()>;

    async fn get_picture(&self, application: &ApplicationId) -> ServiceResult<InlinePicture>;

    async fn renew_client_secret(
        &self,
        application: &ApplicationId,
    ) -> ServiceResult<ApplicationEntity>;

    async fn find_members(
        &self,
        application: &ApplicationId,
        pageable: Pageable,
    ) -> ServiceResult<PagedResult<MemberEntity>>;

    async fn notification_settings(
        &self,
        application: &ApplicationId,
    ) -> ServiceResult<Vec<NotificationSettingEntity>>;

    async fn search_logs(
        &self,
        application: &ApplicationId,
        pageable: Pageable,
    ) -> ServiceResult<PagedResult<ApplicationLogEntity>>;

    async fn analytics(
        &self,
        application: &ApplicationId,
        query: AnalyticsQuery,
    ) -> ServiceResult<serde_json::Value>;
}

#[async_trait]
pub trait RatingService: Send + Sync {
    async fn find_by_api(
        &self,
        api: &ApiId,
        pageable: Pageable,
    ) -> ServiceResult<PagedResult<RatingEntity>>;

    async fn create(&self, rating: NewRatingEntity) -> ServiceResult<RatingEntity>;
}

#[async_trait]
pub trait PageService: Send + Sync {
    async fn search(&self, query: PageQuery) -> ServiceResult<Vec<PageEntity>>;
}

#[async_trait]
pub trait PlanService: Send + Sync {
    async fn find_by_api(&self, api: &ApiId) -> ServiceResult<Vec<PlanEntity>>;
}
