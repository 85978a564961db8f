//! Documentation page entity.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ApiId, PageId, UserId};

/// A documentation page attached to an API (or to the portal itself).
///
/// `configuration` and `metadata` are loosely typed string maps owned by the
/// page service. `BTreeMap` keeps their iteration order deterministic, which the
/// metadata re-indexing relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEntity {
    pub id: PageId,
    pub api: Option<ApiId>,
    pub name: Option<String>,
    /// Raw page type as stored, e.g. `SWAGGER` or `MARKDOWN`
    pub page_type: String,
    pub parent_id: Option<PageId>,
    pub order: i32,
    pub configuration: BTreeMap<String, String>,
    pub metadata: BTreeMap<String, String>,
    pub content: Option<String>,
    pub last_modification_date: DateTime<Utc>,
    pub last_contributor: Option<UserId>,
    pub published: bool,
}

/// Search criteria understood by the page service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub api: Option<ApiId>,
    pub published: Option<bool>,
    pub parent: Option<PageId>,
}

impl PageQuery {
    pub fn published_for_api(api: &ApiId) -> Self {
        Self { api: Some(api.clone()), published: Some(true), parent: None }
    }

    pub fn matches(&self, page: &PageEntity) -> bool {
        if let Some(api) = &self.api {
            if page.api.as_ref() != Some(api) {
                return false;
            }
        }
        if let Some(published) = self.published {
            if page.published != published {
                return false;
            }
        }
        if let Some(parent) = &self.parent {
            if page.parent_id.as_ref() != Some(parent) {
                return false;
            }
        }
        true
    }
}
