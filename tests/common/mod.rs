//! Shared harness for the HTTP integration tests.
//!
//! Every test gets a fresh [`InMemoryPortal`] seeded with a small fixed data
//! set and a router wired the same way the binary wires it.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use portal_rest::{
    api::{build_router, ApiState},
    auth::StaticTokenIdentityProvider,
    domain::{
        AnalyticsQuery, ApiEntity, ApiId, ApiLifecycleState, ApiState as RuntimeState,
        ApplicationEntity, ApplicationId, ApplicationLogEntity, ApplicationSettings,
        InlinePicture, MemberEntity, NotificationSettingEntity, OAuthClientSettings, PageEntity,
        PageId, Pageable, PagedResult, PlanEntity, PlanId, PlanSecurityType, PlanStatus,
        PlanValidationType, SimpleApplicationSettings, UpdateApplicationEntity, UserId,
        Visibility,
    },
    errors::ServiceResult,
    services::{memory::fixed_instant, ApplicationService, InMemoryPortal},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

pub const OWNER: &str = "owner";
pub const OTHER: &str = "other";

pub const OWNER_TOKEN: &str = "owner-token";
pub const OTHER_TOKEN: &str = "other-token";
pub const READER_TOKEN: &str = "reader-token";
pub const ADMIN_TOKEN: &str = "admin-token";

pub const PUBLIC_API: &str = "api-public";
pub const PRIVATE_API: &str = "api-private";
pub const DRAFT_API: &str = "api-draft";

pub const SIMPLE_APP: &str = "app-simple";
pub const OAUTH_APP: &str = "app-oauth";

pub const BASE_PATH: &str = "/portal/environments/DEFAULT";

/// 1x1 transparent PNG
pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

const APPLICATION_SCOPES: &[&str] = &[
    "application_definition:read",
    "application_definition:update",
    "application_definition:delete",
    "application_member:read",
    "application_notification:read",
    "application_log:read",
    "application_analytics:read",
    "api_rating:create",
];

/// Application service wrapper counting calls to `update`.
pub struct RecordingApplications {
    inner: Arc<InMemoryPortal>,
    updates: AtomicUsize,
    lookups: AtomicUsize,
}

impl RecordingApplications {
    pub fn new(inner: Arc<InMemoryPortal>) -> Self {
        Self { inner, updates: AtomicUsize::new(0), lookups: AtomicUsize::new(0) }
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApplicationService for RecordingApplications {
    async fn find_by_id(&self, application: &ApplicationId) -> ServiceResult<ApplicationEntity> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        ApplicationService::find_by_id(self.inner.as_ref(), application).await
    }

    async fn update(
        &self,
        application: &ApplicationId,
        update: UpdateApplicationEntity,
    ) -> ServiceResult<ApplicationEntity> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(application, update).await
    }

    async fn archive(&self, application: &ApplicationId) -> ServiceResult<()> {
        self.inner.archive(application).await
    }

    async fn get_picture(&self, application: &ApplicationId) -> ServiceResult<InlinePicture> {
        ApplicationService::get_picture(self.inner.as_ref(), application).await
    }

    async fn renew_client_secret(
        &self,
        application: &ApplicationId,
    ) -> ServiceResult<ApplicationEntity> {
        self.inner.renew_client_secret(application).await
    }

    async fn find_members(
        &self,
        application: &ApplicationId,
        pageable: Pageable,
    ) -> ServiceResult<PagedResult<MemberEntity>> {
        self.inner.find_members(application, pageable).await
    }

    async fn notification_settings(
        &self,
        application: &ApplicationId,
    ) -> ServiceResult<Vec<NotificationSettingEntity>> {
        self.inner.notification_settings(application).await
    }

    async fn search_logs(
        &self,
        application: &ApplicationId,
        pageable: Pageable,
    ) -> ServiceResult<PagedResult<ApplicationLogEntity>> {
        self.inner.search_logs(application, pageable).await
    }

    async fn analytics(
        &self,
        application: &ApplicationId,
        query: AnalyticsQuery,
    ) -> ServiceResult<Value> {
        self.inner.analytics(application, query).await
    }
}

pub struct TestApp {
    pub portal: Arc<InMemoryPortal>,
    pub applications: Arc<RecordingApplications>,
    pub state: ApiState,
    pub identity: Arc<StaticTokenIdentityProvider>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_base_path("").await
    }

    pub async fn with_base_path(base_path: &str) -> Self {
        let portal = Arc::new(InMemoryPortal::new());
        seed(&portal).await;

        let applications = Arc::new(RecordingApplications::new(portal.clone()));
        let recorded: Arc<dyn ApplicationService> = applications.clone();
        let mut state = ApiState::from_portal(portal.clone(), base_path);
        state.applications = recorded;

        Self { portal, applications, state, identity: Arc::new(identity()) }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), self.identity.clone())
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).expect("serialize body")))
                .expect("build request"),
            None => builder.body(Body::empty()).expect("build request"),
        };

        self.router().oneshot(request).await.expect("request")
    }

    pub async fn send_raw(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.expect("request")
    }
}

fn identity() -> StaticTokenIdentityProvider {
    let scopes = || APPLICATION_SCOPES.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    StaticTokenIdentityProvider::new()
        .with_token(OWNER_TOKEN, UserId::from(OWNER), scopes())
        .with_token(OTHER_TOKEN, UserId::from(OTHER), scopes())
        .with_token(READER_TOKEN, UserId::from("reader"), vec![])
        .with_token(ADMIN_TOKEN, UserId::from("admin"), vec!["admin:all".into()])
}

pub fn api(id: &str, visibility: Visibility, lifecycle: ApiLifecycleState) -> ApiEntity {
    ApiEntity {
        id: ApiId::from(id),
        name: format!("{id} name"),
        version: "1.0".into(),
        description: Some("Fixture API".into()),
        visibility,
        state: RuntimeState::Started,
        lifecycle_state: lifecycle,
        primary_owner: UserId::from(OWNER),
        labels: vec!["fixture".into()],
        categories: vec![],
        created_at: fixed_instant(),
        updated_at: fixed_instant(),
    }
}

pub fn application(id: &str, settings: Option<ApplicationSettings>) -> ApplicationEntity {
    ApplicationEntity {
        id: ApplicationId::from(id),
        name: format!("{id} name"),
        description: Some("Fixture application".into()),
        groups: BTreeSet::from(["group-a".to_string()]),
        primary_owner: UserId::from(OWNER),
        settings,
        application_type: "SIMPLE".into(),
        status: "ACTIVE".into(),
        picture: Some(PNG_DATA_URI.into()),
        created_at: fixed_instant(),
        updated_at: fixed_instant(),
    }
}

fn page(id: &str, order: i32, published: bool) -> PageEntity {
    PageEntity {
        id: PageId::from(id),
        api: Some(ApiId::from(PUBLIC_API)),
        name: Some(format!("{id} title")),
        page_type: "SWAGGER".into(),
        parent_id: None,
        order,
        configuration: BTreeMap::from([("tryIt".to_string(), "true".to_string())]),
        metadata: BTreeMap::new(),
        content: Some(format!("content of {id}")),
        last_modification_date: fixed_instant(),
        last_contributor: Some(UserId::from(OWNER)),
        published,
    }
}

fn plan(id: &str, status: PlanStatus) -> PlanEntity {
    PlanEntity {
        id: PlanId::from(id),
        api: ApiId::from(PUBLIC_API),
        name: id.to_string(),
        description: None,
        security: PlanSecurityType::ApiKey,
        validation: PlanValidationType::Manual,
        status,
        order: 0,
        characteristics: vec![],
        comment_required: true,
    }
}

async fn seed(portal: &InMemoryPortal) {
    portal.insert_api(api(PUBLIC_API, Visibility::Public, ApiLifecycleState::Published)).await;
    portal.insert_api(api(PRIVATE_API, Visibility::Private, ApiLifecycleState::Published)).await;
    portal.insert_api(api(DRAFT_API, Visibility::Public, ApiLifecycleState::Created)).await;
    portal.set_api_picture(&ApiId::from(PUBLIC_API), PNG_DATA_URI).await;

    portal.insert_page(page("page-1", 1, true)).await;
    portal.insert_page(page("page-hidden", 0, false)).await;
    portal.insert_plan(plan("plan-published", PlanStatus::Published)).await;
    portal.insert_plan(plan("plan-staging", PlanStatus::Staging)).await;

    portal
        .insert_application(application(
            SIMPLE_APP,
            Some(ApplicationSettings::Simple(SimpleApplicationSettings {
                client_id: Some("client-simple".into()),
                app_type: Some("web".into()),
            })),
        ))
        .await;

    let mut oauth = application(
        OAUTH_APP,
        Some(ApplicationSettings::OAuth(OAuthClientSettings {
            client_id: Some("client-oauth".into()),
            client_secret: Some("initial-secret".into()),
            renew_client_secret_supported: true,
            ..Default::default()
        })),
    );
    oauth.picture = None;
    portal.insert_application(oauth).await;

    let app_id = ApplicationId::from(SIMPLE_APP);
    for (index, user) in ["owner", "member-1", "member-2"].iter().enumerate() {
        portal
            .add_application_member(
                &app_id,
                MemberEntity {
                    user: UserId::from(*user),
                    display_name: Some(user.to_uppercase()),
                    role: if index == 0 { "PRIMARY_OWNER".into() } else { "USER".into() },
                    created_at: fixed_instant(),
                },
            )
            .await;
    }
    portal
        .add_notification_setting(
            &app_id,
            NotificationSettingEntity {
                name: "Portal".into(),
                config_type: "PORTAL".into(),
                hooks: vec!["SUBSCRIPTION_ACCEPTED".into()],
                use_system_proxy: false,
            },
        )
        .await;
    for minute in 0..3 {
        portal
            .add_log(
                &app_id,
                ApplicationLogEntity {
                    id: format!("log-{minute}"),
                    timestamp: fixed_instant() + chrono::Duration::minutes(minute),
                    api: ApiId::from(PUBLIC_API),
                    plan: Some(PlanId::from("plan-published")),
                    method: "GET".into(),
                    path: "/echo".into(),
                    status: if minute == 2 { 500 } else { 200 },
                    response_time_ms: 12,
                },
            )
            .await;
    }
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read response body");
    serde_json::from_slice(&bytes).expect("parse json response")
}

pub async fn read_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.expect("read response body").to_vec()
}

/// The single error entry of an error response body.
pub async fn read_error(response: Response<Body>) -> Value {
    let body: Value = read_json(response).await;
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1, "expected exactly one error entry: {body}");
    errors[0].clone()
}
