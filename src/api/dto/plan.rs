use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PlanSecurityType, PlanValidationType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(value_type = String, example = "API_KEY")]
    pub security: PlanSecurityType,
    #[schema(value_type = String, example = "AUTO")]
    pub validation: PlanValidationType,
    pub order: i32,
    pub characteristics: Vec<String>,
    pub comment_required: bool,
}
