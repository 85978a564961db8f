//! Application representations and the update payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::links::ApplicationLinks;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SimpleApplicationSettings {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OAuthClientSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_uri: Option<String>,
    #[serde(default)]
    pub grant_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    /// Required on update payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renew_client_secret_supported: Option<bool>,
    #[serde(default)]
    pub response_types: Vec<String>,
}

/// Wire shape of application settings: at most one of `app` and `oauth`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApplicationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<SimpleApplicationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth: Option<OAuthClientSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub application_type: String,
    pub status: String,
    pub groups: Vec<String>,
    /// Id of the primary owner
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ApplicationSettings>,
    pub has_picture: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ApplicationLinks>,
}

impl Application {
    pub fn with_links(mut self, links: ApplicationLinks) -> Self {
        self.links = Some(links);
        self
    }
}

/// Body of `PUT /applications/{applicationId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ApplicationInput {
    /// Must match the path id (case-insensitive)
    #[validate(length(min = 1, message = "application id is required"))]
    pub id: String,
    #[validate(length(min = 1, max = 256, message = "name must be between 1 and 256 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub settings: Option<ApplicationSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    /// User id
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationSetting {
    pub name: String,
    pub config_type: String,
    pub hooks: Vec<String>,
    pub use_system_proxy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Log {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub api: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub response_time: u64,
}
