use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApplicationLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub members: String,
    pub notifications: String,
    pub picture: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RatingLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    /// The rated API
    pub api: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub pages: String,
    pub plans: String,
    pub ratings: String,
    pub picture: String,
}
