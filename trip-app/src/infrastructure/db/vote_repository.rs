use super::entities::{vote, Vote};
use crate::domain::VoteValue;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Votes of several suggestions at once, oldest first.
    pub async fn list_for_suggestions(
        &self,
        suggestion_ids: Vec<Uuid>,
    ) -> Result<Vec<vote::Model>, DbErr> {
        if suggestion_ids.is_empty() {
            return Ok(Vec::new());
        }
        Vote::find()
            .filter(vote::Column::SuggestionId.is_in(suggestion_ids))
            .order_by_asc(vote::Column::CreatedAt)
            .order_by_asc(vote::Column::UserId)
            .all(&self.db)
            .await
    }

    pub async fn find(&self, suggestion_id: Uuid, user_id: Uuid) -> Result<Option<vote::Model>, DbErr> {
        Vote::find()
            .filter(vote::Column::SuggestionId.eq(suggestion_id))
            .filter(vote::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    pub async fn create(
        &self,
        suggestion_id: Uuid,
        user_id: Uuid,
        value: VoteValue,
    ) -> Result<vote::Model, DbErr> {
        let active = vote::ActiveModel {
            suggestion_id: Set(suggestion_id),
            user_id: Set(user_id),
            value: Set(value.as_i16()),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }

    pub async fn update_value(
        &self,
        suggestion_id: Uuid,
        user_id: Uuid,
        value: VoteValue,
    ) -> Result<vote::Model, DbErr> {
        let existing = self
            .find(suggestion_id, user_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Vote not found".to_string()))?;

        let mut active: vote::ActiveModel = existing.into();
        active.value = Set(value.as_i16());
        active.update(&self.db).await
    }

    pub async fn delete(&self, suggestion_id: Uuid, user_id: Uuid) -> Result<(), DbErr> {
        Vote::delete_many()
            .filter(vote::Column::SuggestionId.eq(suggestion_id))
            .filter(vote::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
