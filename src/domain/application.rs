//! Application entities and the update payloads accepted by the application service.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ApiId, ApplicationId, PlanId, UserId};

/// Settings of a "simple" application: a client id the subscriber manages itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleApplicationSettings {
    pub client_id: Option<String>,
    pub app_type: Option<String>,
}

/// Settings of an application registered against an OAuth2 / OIDC provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthClientSettings {
    pub application_type: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub client_uri: Option<String>,
    pub grant_types: Vec<String>,
    pub logo_uri: Option<String>,
    pub redirect_uris: Vec<String>,
    pub renew_client_secret_supported: bool,
    pub response_types: Vec<String>,
}

/// Exactly one settings variant per application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationSettings {
    Simple(SimpleApplicationSettings),
    OAuth(OAuthClientSettings),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationEntity {
    pub id: ApplicationId,
    pub name: String,
    pub description: Option<String>,
    pub groups: BTreeSet<String>,
    pub primary_owner: UserId,
    pub settings: Option<ApplicationSettings>,
    pub application_type: String,
    pub status: String,
    /// Inline picture as a `data:` URI
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement payload for an application.
///
/// Fields left `None` are cleared by the application service, so callers that
/// only change one attribute must carry the others forward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateApplicationEntity {
    pub name: String,
    pub description: Option<String>,
    pub groups: BTreeSet<String>,
    pub settings: Option<ApplicationSettings>,
    pub picture: Option<String>,
}

impl UpdateApplicationEntity {
    /// Start an update that keeps every current attribute of `application`.
    pub fn carry_forward(application: &ApplicationEntity) -> Self {
        Self {
            name: application.name.clone(),
            description: application.description.clone(),
            groups: application.groups.clone(),
            settings: application.settings.clone(),
            picture: application.picture.clone(),
        }
    }
}

/// A user's membership on an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEntity {
    pub user: UserId,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Notification hooks an application is subscribed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettingEntity {
    pub name: String,
    pub config_type: String,
    pub hooks: Vec<String>,
    pub use_system_proxy: bool,
}

/// One gateway request made by an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationLogEntity {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub api: ApiId,
    pub plan: Option<PlanId>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub response_time_ms: u64,
}

/// Kind of aggregation requested from the analytics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalyticsType {
    Count,
    DateHisto,
    GroupBy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub analytics_type: AnalyticsType,
    pub from: i64,
    pub to: i64,
    pub interval: i64,
    pub field: Option<String>,
}
