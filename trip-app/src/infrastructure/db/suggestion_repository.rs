use super::entities::{suggestion, Suggestion};
use crate::domain::SuggestionDraft;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct SuggestionRepository {
    db: DatabaseConnection,
}

impl SuggestionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_for_place(&self, place_id: Uuid) -> Result<Vec<suggestion::Model>, DbErr> {
        Suggestion::find()
            .filter(suggestion::Column::PlaceId.eq(place_id))
            .order_by_desc(suggestion::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<suggestion::Model>, DbErr> {
        Suggestion::find_by_id(id).one(&self.db).await
    }

    pub async fn create(
        &self,
        place_id: Uuid,
        draft: &SuggestionDraft,
        created_by: Option<Uuid>,
    ) -> Result<suggestion::Model, DbErr> {
        let active = suggestion::ActiveModel {
            id: Set(Uuid::new_v4()),
            place_id: Set(place_id),
            title: Set(draft.title.clone()),
            description: Set(draft.description.clone()),
            category: Set(draft.category.as_str().to_string()),
            link: Set(draft.link.clone()),
            cost_estimate: Set(draft.cost_estimate.clone()),
            created_by: Set(created_by),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        Suggestion::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
