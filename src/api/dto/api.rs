use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::links::ApiLinks;
use super::page::Page;
use super::plan::Plan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Api {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub public: bool,
    pub running: bool,
    /// Lifecycle state, e.g. `PUBLISHED`
    pub lifecycle_state: String,
    /// Id of the primary owner
    pub owner: String,
    pub labels: Vec<String>,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<Page>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<Plan>>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ApiLinks>,
}

impl Api {
    pub fn with_links(mut self, links: ApiLinks) -> Self {
        self.links = Some(links);
        self
    }
}

/// Related collections embedded in the API detail (`?include=pages&include=plans`).
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApiIncludeQuery {
    /// Repeatable: `pages`, `plans`
    #[serde(default)]
    pub include: Vec<String>,
}

impl ApiIncludeQuery {
    pub fn includes(&self, name: &str) -> bool {
        self.include.iter().any(|value| value.eq_ignore_ascii_case(name))
    }
}
