//! Seams between the use cases and the outside world.
//!
//! Use cases receive these as trait objects so they can run against the
//! SeaORM-backed store in production and against in-memory fakes in tests.

use async_trait::async_trait;
use trip_errors::AppError;
use uuid::Uuid;

use crate::domain::{
    AuditEntry, Place, PlaceDraft, ScoredSuggestion, Suggestion, SuggestionDraft, User, VoteValue,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Maps to the failure of the operation that was attempted.
    pub fn into_app_error(self, failed: fn(String) -> AppError) -> AppError {
        match self {
            Self::NotFound => AppError::NotFound,
            Self::Backend(message) => failed(message),
        }
    }
}

/// Persistence for places, suggestions, votes and the users that own them.
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn insert_user(&self, name: &str) -> Result<User, StoreError>;

    /// Places ordered by name.
    async fn list_places(&self) -> Result<Vec<Place>, StoreError>;
    async fn find_place(&self, id: Uuid) -> Result<Option<Place>, StoreError>;
    async fn insert_place(
        &self,
        draft: &PlaceDraft,
        created_by: Option<Uuid>,
    ) -> Result<Place, StoreError>;
    async fn update_place(&self, id: Uuid, draft: &PlaceDraft) -> Result<Place, StoreError>;
    /// Suggestions and their votes go with the place.
    async fn delete_place(&self, id: Uuid) -> Result<(), StoreError>;

    /// Suggestions of a place with creator and votes, newest first.
    async fn list_suggestions(&self, place_id: Uuid) -> Result<Vec<ScoredSuggestion>, StoreError>;
    async fn find_suggestion(&self, id: Uuid) -> Result<Option<ScoredSuggestion>, StoreError>;
    async fn insert_suggestion(
        &self,
        place_id: Uuid,
        draft: &SuggestionDraft,
        created_by: Option<Uuid>,
    ) -> Result<Suggestion, StoreError>;
    async fn delete_suggestion(&self, id: Uuid) -> Result<(), StoreError>;

    async fn insert_vote(
        &self,
        suggestion_id: Uuid,
        user_id: Uuid,
        value: VoteValue,
    ) -> Result<(), StoreError>;
    async fn update_vote(
        &self,
        suggestion_id: Uuid,
        user_id: Uuid,
        value: VoteValue,
    ) -> Result<(), StoreError>;
    async fn delete_vote(&self, suggestion_id: Uuid, user_id: Uuid) -> Result<(), StoreError>;
}

/// Audit trail writer. Fire-and-forget: implementations deal with their own
/// failures.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn write(&self, entry: AuditEntry);
}
