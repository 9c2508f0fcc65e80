use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use super::entities::suggestion;
use super::{PlaceRepository, SuggestionRepository, UserRepository, VoteRepository};
use crate::application::{StoreError, TripStore};
use crate::domain::{
    Place, PlaceDraft, ScoredSuggestion, Suggestion, SuggestionDraft, User, VoteEntry, VoteValue,
};

/// `TripStore` backed by the SeaORM repositories.
#[derive(Clone)]
pub struct DbTripStore {
    users: UserRepository,
    places: PlaceRepository,
    suggestions: SuggestionRepository,
    votes: VoteRepository,
}

impl DbTripStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            places: PlaceRepository::new(db.clone()),
            suggestions: SuggestionRepository::new(db.clone()),
            votes: VoteRepository::new(db),
        }
    }

    /// Attaches creator names and votes to fetched rows, keeping their order.
    async fn with_votes(
        &self,
        rows: Vec<suggestion::Model>,
    ) -> Result<Vec<ScoredSuggestion>, DbErr> {
        let ids = rows.iter().map(|s| s.id).collect();
        let mut creator_ids: Vec<Uuid> = rows.iter().filter_map(|s| s.created_by).collect();
        creator_ids.sort_unstable();
        creator_ids.dedup();

        let creators: HashMap<Uuid, String> = self
            .users
            .find_many(creator_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let mut votes: HashMap<Uuid, Vec<VoteEntry>> = HashMap::new();
        for row in self.votes.list_for_suggestions(ids).await? {
            match VoteValue::try_from(row.value) {
                Ok(value) => votes
                    .entry(row.suggestion_id)
                    .or_default()
                    .push(VoteEntry::new(row.user_id, value)),
                Err(e) => tracing::warn!(
                    suggestion_id = %row.suggestion_id,
                    "Skipping vote row: {}",
                    e
                ),
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let creator = row.created_by.and_then(|id| creators.get(&id).cloned());
                let entries = votes.remove(&row.id).unwrap_or_default();
                ScoredSuggestion::new(row.into(), creator, entries)
            })
            .collect())
    }
}

#[async_trait]
impl TripStore for DbTripStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = self.users.list().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_by_id(id).await?.map(Into::into))
    }

    async fn insert_user(&self, name: &str) -> Result<User, StoreError> {
        Ok(self.users.create(name).await?.into())
    }

    async fn list_places(&self) -> Result<Vec<Place>, StoreError> {
        let rows = self.places.list().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_place(&self, id: Uuid) -> Result<Option<Place>, StoreError> {
        Ok(self.places.find_by_id(id).await?.map(Into::into))
    }

    async fn insert_place(
        &self,
        draft: &PlaceDraft,
        created_by: Option<Uuid>,
    ) -> Result<Place, StoreError> {
        Ok(self.places.create(draft, created_by).await?.into())
    }

    async fn update_place(&self, id: Uuid, draft: &PlaceDraft) -> Result<Place, StoreError> {
        Ok(self.places.update(id, draft).await?.into())
    }

    async fn delete_place(&self, id: Uuid) -> Result<(), StoreError> {
        Ok(self.places.delete(id).await?)
    }

    async fn list_suggestions(&self, place_id: Uuid) -> Result<Vec<ScoredSuggestion>, StoreError> {
        let rows = self.suggestions.list_for_place(place_id).await?;
        Ok(self.with_votes(rows).await?)
    }

    async fn find_suggestion(&self, id: Uuid) -> Result<Option<ScoredSuggestion>, StoreError> {
        let Some(row) = self.suggestions.find_by_id(id).await? else {
            return Ok(None);
        };
        Ok(self.with_votes(vec![row]).await?.pop())
    }

    async fn insert_suggestion(
        &self,
        place_id: Uuid,
        draft: &SuggestionDraft,
        created_by: Option<Uuid>,
    ) -> Result<Suggestion, StoreError> {
        Ok(self
            .suggestions
            .create(place_id, draft, created_by)
            .await?
            .into())
    }

    async fn delete_suggestion(&self, id: Uuid) -> Result<(), StoreError> {
        Ok(self.suggestions.delete(id).await?)
    }

    async fn insert_vote(
        &self,
        suggestion_id: Uuid,
        user_id: Uuid,
        value: VoteValue,
    ) -> Result<(), StoreError> {
        self.votes.create(suggestion_id, user_id, value).await?;
        Ok(())
    }

    async fn update_vote(
        &self,
        suggestion_id: Uuid,
        user_id: Uuid,
        value: VoteValue,
    ) -> Result<(), StoreError> {
        self.votes.update_value(suggestion_id, user_id, value).await?;
        Ok(())
    }

    async fn delete_vote(&self, suggestion_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        Ok(self.votes.delete(suggestion_id, user_id).await?)
    }
}
