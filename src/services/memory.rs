//! In-memory implementation of every collaborator service.
//!
//! Used by the standalone binary (`--seed-demo-data`) and by the integration
//! tests. State lives behind a single `RwLock`; every read hands out clones.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{
    AnalyticsQuery, AnalyticsType, ApiEntity, ApiId, ApiLifecycleState, ApiState,
    ApplicationEntity, ApplicationId, ApplicationLogEntity, ApplicationSettings, InlinePicture,
    MemberEntity, NewRatingEntity, NotificationSettingEntity, OAuthClientSettings, PageEntity,
    PageId, PageQuery, Pageable, PagedResult, PlanEntity, PlanId, PlanSecurityType, PlanStatus,
    PlanValidationType, RatingEntity, RatingId, SimpleApplicationSettings,
    UpdateApplicationEntity, UserId, Visibility,
};
use crate::errors::{ResourceKind, ServiceError, ServiceResult};

use super::picture::decode_data_uri;
use super::{ApiService, ApplicationService, PageService, PlanService, RatingService};

const ARCHIVED_STATUS: &str = "ARCHIVED";

#[derive(Debug, Default)]
struct PortalState {
    apis: BTreeMap<ApiId, ApiEntity>,
    api_pictures: HashMap<ApiId, String>,
    api_members: HashMap<ApiId, BTreeSet<UserId>>,
    applications: BTreeMap<ApplicationId, ApplicationEntity>,
    members: HashMap<ApplicationId, Vec<MemberEntity>>,
    notifications: HashMap<ApplicationId, Vec<NotificationSettingEntity>>,
    logs: HashMap<ApplicationId, Vec<ApplicationLogEntity>>,
    ratings: Vec<RatingEntity>,
    pages: Vec<PageEntity>,
    plans: Vec<PlanEntity>,
}

impl PortalState {
    fn active_application(&self, id: &ApplicationId) -> ServiceResult<&ApplicationEntity> {
        self.applications
            .get(id)
            .filter(|app| app.status != ARCHIVED_STATUS)
            .ok_or_else(|| ServiceError::not_found(ResourceKind::Application, id.as_str()))
    }

    fn active_application_mut(
        &mut self,
        id: &ApplicationId,
    ) -> ServiceResult<&mut ApplicationEntity> {
        self.applications
            .get_mut(id)
            .filter(|app| app.status != ARCHIVED_STATUS)
            .ok_or_else(|| ServiceError::not_found(ResourceKind::Application, id.as_str()))
    }
}

/// Portal backend kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryPortal {
    state: RwLock<PortalState>,
}

impl InMemoryPortal {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_api(&self, api: ApiEntity) {
        self.state.write().await.apis.insert(api.id.clone(), api);
    }

    /// Store the picture of an API as a data URI.
    pub async fn set_api_picture(&self, api: &ApiId, data_uri: impl Into<String>) {
        self.state.write().await.api_pictures.insert(api.clone(), data_uri.into());
    }

    /// Grant a user visibility on a private API.
    pub async fn add_api_member(&self, api: &ApiId, user: UserId) {
        self.state.write().await.api_members.entry(api.clone()).or_default().insert(user);
    }

    pub async fn insert_application(&self, application: ApplicationEntity) {
        self.state.write().await.applications.insert(application.id.clone(), application);
    }

    pub async fn add_application_member(&self, application: &ApplicationId, member: MemberEntity) {
        self.state.write().await.members.entry(application.clone()).or_default().push(member);
    }

    pub async fn add_notification_setting(
        &self,
        application: &ApplicationId,
        setting: NotificationSettingEntity,
    ) {
        self.state.write().await.notifications.entry(application.clone()).or_default().push(setting);
    }

    pub async fn add_log(&self, application: &ApplicationId, log: ApplicationLogEntity) {
        self.state.write().await.logs.entry(application.clone()).or_default().push(log);
    }

    pub async fn insert_rating(&self, rating: RatingEntity) {
        self.state.write().await.ratings.push(rating);
    }

    pub async fn insert_page(&self, page: PageEntity) {
        self.state.write().await.pages.push(page);
    }

    pub async fn insert_plan(&self, plan: PlanEntity) {
        self.state.write().await.plans.push(plan);
    }

    /// Populate a small, self-consistent data set owned by `demo-user`.
    pub async fn seed_demo_data(&self) {
        let owner = UserId::from("demo-user");
        let now = Utc::now();
        let api_id = ApiId::from("demo-api");
        let app_id = ApplicationId::from("demo-app");

        self.insert_api(ApiEntity {
            id: api_id.clone(),
            name: "Demo API".into(),
            version: "1.0".into(),
            description: Some("Echo service used to try the portal".into()),
            visibility: Visibility::Public,
            state: ApiState::Started,
            lifecycle_state: ApiLifecycleState::Published,
            primary_owner: owner.clone(),
            labels: vec!["demo".into()],
            categories: vec!["samples".into()],
            created_at: now,
            updated_at: now,
        })
        .await;
        self.set_api_picture(&api_id, DEMO_PICTURE).await;

        self.insert_page(PageEntity {
            id: PageId::from("demo-page"),
            api: Some(api_id.clone()),
            name: Some("Getting started".into()),
            page_type: "MARKDOWN".into(),
            parent_id: None,
            order: 0,
            configuration: BTreeMap::new(),
            metadata: BTreeMap::from([("audience".to_string(), "everyone".to_string())]),
            content: Some("# Demo API\n\nCall `GET /echo`.".into()),
            last_modification_date: now,
            last_contributor: Some(owner.clone()),
            published: true,
        })
        .await;

        self.insert_plan(PlanEntity {
            id: PlanId::from("demo-plan"),
            api: api_id.clone(),
            name: "Free".into(),
            description: Some("Keyless access".into()),
            security: PlanSecurityType::KeyLess,
            validation: PlanValidationType::Auto,
            status: PlanStatus::Published,
            order: 0,
            characteristics: vec!["unlimited".into()],
            comment_required: false,
        })
        .await;

        self.insert_application(ApplicationEntity {
            id: app_id.clone(),
            name: "Demo application".into(),
            description: Some("Application consuming the demo API".into()),
            groups: BTreeSet::new(),
            primary_owner: owner.clone(),
            settings: Some(ApplicationSettings::Simple(SimpleApplicationSettings {
                client_id: Some("demo-client".into()),
                app_type: Some("web".into()),
            })),
            application_type: "SIMPLE".into(),
            status: "ACTIVE".into(),
            picture: Some(DEMO_PICTURE.into()),
            created_at: now,
            updated_at: now,
        })
        .await;

        self.add_application_member(
            &app_id,
            MemberEntity {
                user: owner,
                display_name: Some("Demo User".into()),
                role: "PRIMARY_OWNER".into(),
                created_at: now,
            },
        )
        .await;

        info!(api_id = %api_id, application_id = %app_id, "Seeded demo portal data");
    }
}

/// 1x1 transparent PNG
const DEMO_PICTURE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

#[async_trait]
impl ApiService for InMemoryPortal {
    async fn find_published_by_user(&self, user: Option<&UserId>) -> ServiceResult<Vec<ApiId>> {
        let state = self.state.read().await;
        let visible = state
            .apis
            .values()
            .filter(|api| api.lifecycle_state == ApiLifecycleState::Published)
            .filter(|api| {
                api.is_public()
                    || user.is_some_and(|user| {
                        &api.primary_owner == user
                            || state.api_members.get(&api.id).is_some_and(|m| m.contains(user))
                    })
            })
            .map(|api| api.id.clone())
            .collect();
        Ok(visible)
    }

    async fn find_by_id(&self, api: &ApiId) -> ServiceResult<ApiEntity> {
        self.state
            .read()
            .await
            .apis
            .get(api)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(ResourceKind::Api, api.as_str()))
    }

    async fn get_picture(&self, api: &ApiId) -> ServiceResult<InlinePicture> {
        let state = self.state.read().await;
        if !state.apis.contains_key(api) {
            return Err(ServiceError::not_found(ResourceKind::Api, api.as_str()));
        }
        let uri = state
            .api_pictures
            .get(api)
            .ok_or_else(|| ServiceError::not_found(ResourceKind::Picture, api.as_str()))?;
        decode_data_uri(uri).map_err(|e| ServiceError::internal(e.to_string()))
    }
}

#[async_trait]
impl ApplicationService for InMemoryPortal {
    async fn find_by_id(&self, application: &ApplicationId) -> ServiceResult<ApplicationEntity> {
        self.state.read().await.active_application(application).cloned()
    }

    async fn update(
        &self,
        application: &ApplicationId,
        update: UpdateApplicationEntity,
    ) -> ServiceResult<ApplicationEntity> {
        let mut state = self.state.write().await;
        let entity = state.active_application_mut(application)?;

        if update.name.trim().is_empty() {
            return Err(ServiceError::validation("application name must not be empty"));
        }

        entity.name = update.name;
        entity.description = update.description;
        entity.groups = update.groups;
        entity.settings = update.settings;
        entity.picture = update.picture;
        entity.updated_at = next_update_instant(entity.updated_at);

        debug!(application_id = %application, "Updated application");
        Ok(entity.clone())
    }

    async fn archive(&self, application: &ApplicationId) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        let entity = state.active_application_mut(application)?;
        entity.status = ARCHIVED_STATUS.to_string();
        entity.updated_at = next_update_instant(entity.updated_at);
        Ok(())
    }

    async fn get_picture(&self, application: &ApplicationId) -> ServiceResult<InlinePicture> {
        let state = self.state.read().await;
        let entity = state.active_application(application)?;
        let uri = entity
            .picture
            .as_deref()
            .ok_or_else(|| ServiceError::not_found(ResourceKind::Picture, application.as_str()))?;
        decode_data_uri(uri).map_err(|e| ServiceError::internal(e.to_string()))
    }

    async fn renew_client_secret(
        &self,
        application: &ApplicationId,
    ) -> ServiceResult<ApplicationEntity> {
        let mut state = self.state.write().await;
        let entity = state.active_application_mut(application)?;

        match entity.settings.as_mut() {
            Some(ApplicationSettings::OAuth(OAuthClientSettings {
                client_secret,
                renew_client_secret_supported: true,
                ..
            })) => {
                *client_secret = Some(uuid::Uuid::new_v4().simple().to_string());
            }
            _ => {
                return Err(ServiceError::validation(format!(
                    "Application [{}] does not support client secret renewal",
                    application
                )))
            }
        }

        entity.updated_at = next_update_instant(entity.updated_at);
        Ok(entity.clone())
    }

    async fn find_members(
        &self,
        application: &ApplicationId,
        pageable: Pageable,
    ) -> ServiceResult<PagedResult<MemberEntity>> {
        let state = self.state.read().await;
        state.active_application(application)?;
        let members = state.members.get(application).cloned().unwrap_or_default();
        Ok(PagedResult::slice(members, pageable))
    }

    async fn notification_settings(
        &self,
        application: &ApplicationId,
    ) -> ServiceResult<Vec<NotificationSettingEntity>> {
        let state = self.state.read().await;
        state.active_application(application)?;
        Ok(state.notifications.get(application).cloned().unwrap_or_default())
    }

    async fn search_logs(
        &self,
        application: &ApplicationId,
        pageable: Pageable,
    ) -> ServiceResult<PagedResult<ApplicationLogEntity>> {
        let state = self.state.read().await;
        state.active_application(application)?;
        let mut logs = state.logs.get(application).cloned().unwrap_or_default();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(PagedResult::slice(logs, pageable))
    }

    async fn analytics(
        &self,
        application: &ApplicationId,
        query: AnalyticsQuery,
    ) -> ServiceResult<serde_json::Value> {
        let state = self.state.read().await;
        state.active_application(application)?;

        let logs: Vec<&ApplicationLogEntity> = state
            .logs
            .get(application)
            .map(|logs| {
                logs.iter()
                    .filter(|log| {
                        let ts = log.timestamp.timestamp_millis();
                        ts >= query.from && ts <= query.to
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(aggregate(&logs, &query))
    }
}

fn aggregate(logs: &[&ApplicationLogEntity], query: &AnalyticsQuery) -> serde_json::Value {
    match query.analytics_type {
        AnalyticsType::Count => json!({ "hits": logs.len() }),
        AnalyticsType::GroupBy => {
            let field = query.field.as_deref().unwrap_or("status");
            let mut values: BTreeMap<String, u64> = BTreeMap::new();
            for log in logs {
                let key = match field {
                    "api" => log.api.to_string(),
                    "plan" => log.plan.as_ref().map(|p| p.to_string()).unwrap_or_default(),
                    "method" => log.method.clone(),
                    _ => log.status.to_string(),
                };
                *values.entry(key).or_default() += 1;
            }
            json!({ "field": field, "values": values })
        }
        AnalyticsType::DateHisto => {
            let interval = query.interval.max(1);
            let buckets = ((query.to - query.from).max(0) / interval + 1) as usize;
            let mut counts = vec![0u64; buckets];
            for log in logs {
                let index = ((log.timestamp.timestamp_millis() - query.from) / interval) as usize;
                if let Some(count) = counts.get_mut(index) {
                    *count += 1;
                }
            }
            json!({
                "timestamp": { "from": query.from, "to": query.to, "interval": interval },
                "values": counts,
            })
        }
    }
}

/// Strictly later than `previous`, so cache validators change on every write.
fn next_update_instant(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    let floor = previous + Duration::milliseconds(1);
    if now > floor {
        now
    } else {
        floor
    }
}

#[async_trait]
impl RatingService for InMemoryPortal {
    async fn find_by_api(
        &self,
        api: &ApiId,
        pageable: Pageable,
    ) -> ServiceResult<PagedResult<RatingEntity>> {
        let state = self.state.read().await;
        let mut ratings: Vec<RatingEntity> =
            state.ratings.iter().filter(|r| &r.api == api).cloned().collect();
        ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(PagedResult::slice(ratings, pageable))
    }

    async fn create(&self, rating: NewRatingEntity) -> ServiceResult<RatingEntity> {
        let mut state = self.state.write().await;
        if !state.apis.contains_key(&rating.api) {
            return Err(ServiceError::not_found(ResourceKind::Api, rating.api.as_str()));
        }
        if state.ratings.iter().any(|r| r.api == rating.api && r.user == rating.user) {
            return Err(ServiceError::Conflict(format!(
                "Rating already exists for api [{}] and user [{}]",
                rating.api, rating.user
            )));
        }

        let now = Utc::now();
        let entity = RatingEntity {
            id: RatingId::new(),
            api: rating.api,
            user: rating.user,
            title: rating.title,
            comment: rating.comment,
            rate: rating.rate,
            created_at: now,
            updated_at: now,
        };
        state.ratings.push(entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl PageService for InMemoryPortal {
    async fn search(&self, query: PageQuery) -> ServiceResult<Vec<PageEntity>> {
        let state = self.state.read().await;
        let mut pages: Vec<PageEntity> =
            state.pages.iter().filter(|page| query.matches(page)).cloned().collect();
        pages.sort_by_key(|page| page.order);
        Ok(pages)
    }
}

#[async_trait]
impl PlanService for InMemoryPortal {
    async fn find_by_api(&self, api: &ApiId) -> ServiceResult<Vec<PlanEntity>> {
        let state = self.state.read().await;
        let mut plans: Vec<PlanEntity> =
            state.plans.iter().filter(|plan| &plan.api == api).cloned().collect();
        plans.sort_by_key(|plan| plan.order);
        Ok(plans)
    }
}

/// Epoch used by fixtures that need stable timestamps.
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(id: &str, visibility: Visibility, lifecycle: ApiLifecycleState) -> ApiEntity {
        ApiEntity {
            id: ApiId::from(id),
            name: id.into(),
            version: "1".into(),
            description: None,
            visibility,
            state: ApiState::Started,
            lifecycle_state: lifecycle,
            primary_owner: UserId::from("owner"),
            labels: vec![],
            categories: vec![],
            created_at: fixed_instant(),
            updated_at: fixed_instant(),
        }
    }

    fn application(id: &str) -> ApplicationEntity {
        ApplicationEntity {
            id: ApplicationId::from(id),
            name: "app".into(),
            description: None,
            groups: BTreeSet::new(),
            primary_owner: UserId::from("owner"),
            settings: None,
            application_type: "SIMPLE".into(),
            status: "ACTIVE".into(),
            picture: None,
            created_at: fixed_instant(),
            updated_at: fixed_instant(),
        }
    }

    #[tokio::test]
    async fn published_visibility_rules() {
        let portal = InMemoryPortal::new();
        portal.insert_api(api("public", Visibility::Public, ApiLifecycleState::Published)).await;
        portal.insert_api(api("private", Visibility::Private, ApiLifecycleState::Published)).await;
        portal.insert_api(api("draft", Visibility::Public, ApiLifecycleState::Created)).await;
        portal.add_api_member(&ApiId::from("private"), UserId::from("member")).await;

        let anonymous = portal.find_published_by_user(None).await.unwrap();
        assert_eq!(anonymous, vec![ApiId::from("public")]);

        let member = portal.find_published_by_user(Some(&UserId::from("member"))).await.unwrap();
        assert_eq!(member, vec![ApiId::from("private"), ApiId::from("public")]);

        let owner = portal.find_published_by_user(Some(&UserId::from("owner"))).await.unwrap();
        assert_eq!(owner.len(), 2);
    }

    #[tokio::test]
    async fn archived_applications_disappear() {
        let portal = InMemoryPortal::new();
        portal.insert_application(application("app-1")).await;
        let id = ApplicationId::from("app-1");

        ApplicationService::archive(&portal, &id).await.unwrap();
        let err = ApplicationService::find_by_id(&portal, &id).await.unwrap_err();
        assert_eq!(err, ServiceError::not_found(ResourceKind::Application, "app-1"));
    }

    #[tokio::test]
    async fn update_moves_updated_at_forward() {
        let portal = InMemoryPortal::new();
        let app = application("app-1");
        let before = app.updated_at;
        portal.insert_application(app.clone()).await;

        let mut update = UpdateApplicationEntity::carry_forward(&app);
        update.name = "renamed".into();
        let updated = portal.update(&app.id, update).await.unwrap();
        assert_eq!(updated.name, "renamed");
        assert!(updated.updated_at > before);
    }

    #[tokio::test]
    async fn renew_secret_requires_oauth_support() {
        let portal = InMemoryPortal::new();
        let mut app = application("app-1");
        portal.insert_application(app.clone()).await;
        assert!(matches!(
            portal.renew_client_secret(&app.id).await,
            Err(ServiceError::Validation(_))
        ));

        app.settings = Some(ApplicationSettings::OAuth(OAuthClientSettings {
            client_secret: Some("old".into()),
            renew_client_secret_supported: true,
            ..Default::default()
        }));
        portal.insert_application(app.clone()).await;
        let renewed = portal.renew_client_secret(&app.id).await.unwrap();
        match renewed.settings {
            Some(ApplicationSettings::OAuth(oauth)) => {
                assert_ne!(oauth.client_secret.as_deref(), Some("old"));
            }
            other => panic!("unexpected settings {other:?}"),
        }
    }

    #[tokio::test]
    async fn second_rating_by_same_user_conflicts() {
        let portal = InMemoryPortal::new();
        portal.insert_api(api("api-1", Visibility::Public, ApiLifecycleState::Published)).await;
        let rating = NewRatingEntity {
            api: ApiId::from("api-1"),
            user: UserId::from("user-1"),
            title: None,
            comment: None,
            rate: 4,
        };
        portal.create(rating.clone()).await.unwrap();
        assert!(matches!(portal.create(rating).await, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn analytics_count_and_group_by() {
        let portal = InMemoryPortal::new();
        let app = application("app-1");
        portal.insert_application(app.clone()).await;
        for status in [200u16, 200, 404] {
            portal
                .add_log(
                    &app.id,
                    ApplicationLogEntity {
                        id: uuid::Uuid::new_v4().to_string(),
                        timestamp: fixed_instant(),
                        api: ApiId::from("api-1"),
                        plan: None,
                        method: "GET".into(),
                        path: "/".into(),
                        status,
                        response_time_ms: 3,
                    },
                )
                .await;
        }
        let ts = fixed_instant().timestamp_millis();
        let query = |analytics_type| AnalyticsQuery {
            analytics_type,
            from: ts - 1000,
            to: ts + 1000,
            interval: 1000,
            field: Some("status".into()),
        };

        let count = portal.analytics(&app.id, query(AnalyticsType::Count)).await.unwrap();
        assert_eq!(count["hits"], 3);

        let grouped = portal.analytics(&app.id, query(AnalyticsType::GroupBy)).await.unwrap();
        assert_eq!(grouped["values"]["200"], 2);
        assert_eq!(grouped["values"]["404"], 1);

        let histo = portal.analytics(&app.id, query(AnalyticsType::DateHisto)).await.unwrap();
        assert_eq!(histo["values"], json!([0, 3, 0]));
    }
}
