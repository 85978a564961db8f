use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::links::RatingLinks;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rating {
    pub id: String,
    pub api: String,
    /// Id of the user who wrote the rating
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub value: u8,
    pub date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<RatingLinks>,
}

impl Rating {
    pub fn with_links(mut self, links: RatingLinks) -> Self {
        self.links = Some(links);
        self
    }
}

/// Body of `POST /apis/{apiId}/ratings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct RatingInput {
    #[serde(default)]
    #[validate(length(max = 64))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(max = 4096))]
    pub comment: Option<String>,
    #[serde(default)]
    #[validate(required, range(min = 1, max = 5))]
    #[schema(minimum = 1, maximum = 5)]
    pub value: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(value: Option<i64>) -> RatingInput {
        RatingInput { value, ..Default::default() }
    }

    #[test]
    fn rate_must_be_between_one_and_five() {
        assert!(input(Some(1)).validate().is_ok());
        assert!(input(Some(5)).validate().is_ok());
        assert!(input(Some(0)).validate().is_err());
        assert!(input(Some(6)).validate().is_err());
        assert!(input(Some(-3)).validate().is_err());
        assert!(input(None).validate().is_err());
    }
}
