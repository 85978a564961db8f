//! Rating entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ApiId, RatingId, UserId};

pub const MIN_RATE: u8 = 1;
pub const MAX_RATE: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntity {
    pub id: RatingId,
    pub api: ApiId,
    pub user: UserId,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub rate: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation request handed to the rating service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRatingEntity {
    pub api: ApiId,
    pub user: UserId,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub rate: u8,
}
