use crate::api::dto::{Api, Plan};
use crate::domain::{ApiEntity, PlanEntity};

pub fn convert_api(entity: &ApiEntity) -> Api {
    Api {
        id: entity.id.to_string(),
        name: entity.name.clone(),
        version: entity.version.clone(),
        description: entity.description.clone(),
        public: entity.is_public(),
        running: entity.is_running(),
        lifecycle_state: entity.lifecycle_state.as_str().to_string(),
        owner: entity.primary_owner.to_string(),
        labels: entity.labels.clone(),
        categories: entity.categories.clone(),
        created_at: entity.created_at,
        updated_at: entity.updated_at,
        pages: None,
        plans: None,
        links: None,
    }
}

pub fn convert_plan(entity: &PlanEntity) -> Plan {
    Plan {
        id: entity.id.to_string(),
        name: entity.name.clone(),
        description: entity.description.clone(),
        security: entity.security,
        validation: entity.validation,
        order: entity.order,
        characteristics: entity.characteristics.clone(),
        comment_required: entity.comment_required,
    }
}
