use crate::api::dto::Rating;
use crate::domain::RatingEntity;

pub fn convert_rating(entity: &RatingEntity) -> Rating {
    Rating {
        id: entity.id.to_string(),
        api: entity.api.to_string(),
        author: entity.user.to_string(),
        title: entity.title.clone(),
        comment: entity.comment.clone(),
        value: entity.rate,
        date: entity.created_at,
        updated_at: entity.updated_at,
        links: None,
    }
}
