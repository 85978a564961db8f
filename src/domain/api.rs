//! API entity as exposed by the API service.
//!
//! The exposure layer only reads these values to decide visibility and to build
//! the public `Api` representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ApiId, UserId};

/// Who can discover an API in the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Private,
}

/// Gateway deployment state of an API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiState {
    Started,
    Stopped,
}

/// Portal lifecycle of an API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiLifecycleState {
    Created,
    Published,
    Unpublished,
    Deprecated,
    Archived,
}

impl ApiLifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiLifecycleState::Created => "CREATED",
            ApiLifecycleState::Published => "PUBLISHED",
            ApiLifecycleState::Unpublished => "UNPUBLISHED",
            ApiLifecycleState::Deprecated => "DEPRECATED",
            ApiLifecycleState::Archived => "ARCHIVED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEntity {
    pub id: ApiId,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub state: ApiState,
    pub lifecycle_state: ApiLifecycleState,
    pub primary_owner: UserId,
    pub labels: Vec<String>,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApiEntity {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_running(&self) -> bool {
        self.state == ApiState::Started
    }
}
