//! Subscription plan entity.

use serde::{Deserialize, Serialize};

use super::id::{ApiId, PlanId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanSecurityType {
    ApiKey,
    KeyLess,
    Jwt,
    Oauth2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanValidationType {
    Auto,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    Staging,
    Published,
    Closed,
    Deprecated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntity {
    pub id: PlanId,
    pub api: ApiId,
    pub name: String,
    pub description: Option<String>,
    pub security: PlanSecurityType,
    pub validation: PlanValidationType,
    pub status: PlanStatus,
    pub order: i32,
    pub characteristics: Vec<String>,
    pub comment_required: bool,
}

impl PlanEntity {
    pub fn is_published(&self) -> bool {
        self.status == PlanStatus::Published
    }
}
