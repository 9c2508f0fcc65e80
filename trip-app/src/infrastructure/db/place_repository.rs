use super::entities::{place, Place};
use crate::domain::PlaceDraft;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct PlaceRepository {
    db: DatabaseConnection,
}

impl PlaceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<place::Model>, DbErr> {
        Place::find()
            .order_by_asc(place::Column::Name)
            .all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<place::Model>, DbErr> {
        Place::find_by_id(id).one(&self.db).await
    }

    pub async fn create(
        &self,
        draft: &PlaceDraft,
        created_by: Option<Uuid>,
    ) -> Result<place::Model, DbErr> {
        let active = place::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name.clone()),
            region: Set(draft.region.clone()),
            created_by: Set(created_by),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }

    pub async fn update(&self, id: Uuid, draft: &PlaceDraft) -> Result<place::Model, DbErr> {
        let place = Place::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DbErr::RecordNotFound("Place not found".to_string()))?;

        let mut active: place::ActiveModel = place.into();
        active.name = Set(draft.name.clone());
        active.region = Set(draft.region.clone());
        active.update(&self.db).await
    }

    /// Suggestions and votes are removed by the foreign key cascade.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbErr> {
        Place::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
