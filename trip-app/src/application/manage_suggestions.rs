use std::sync::Arc;

use trip_errors::AppError;
use uuid::Uuid;

use super::after_commit;
use super::interfaces::{AuditLog, TripStore};
use crate::domain::{AuditEntity, AuditEntry, Committed, SuggestionBoard, SuggestionForm};
use crate::infrastructure::security::InputSanitizer;

pub struct ManageSuggestions {
    store: Arc<dyn TripStore>,
    audit: Arc<dyn AuditLog>,
}

impl ManageSuggestions {
    pub fn new(store: Arc<dyn TripStore>, audit: Arc<dyn AuditLog>) -> Self {
        Self { store, audit }
    }

    pub async fn board(&self, place_id: Uuid) -> Result<SuggestionBoard, AppError> {
        load_board(self.store.as_ref(), place_id).await
    }

    pub async fn create(
        &self,
        actor: Option<Uuid>,
        place_id: Uuid,
        form: SuggestionForm,
    ) -> Result<Committed<SuggestionBoard>, AppError> {
        let draft = InputSanitizer::validate_suggestion(&form)?;

        let suggestion = self
            .store
            .insert_suggestion(place_id, &draft, actor)
            .await
            .map_err(|e| {
                tracing::error!(place_id = %place_id, "Failed to create suggestion: {}", e);
                e.into_app_error(AppError::CreateFailed)
            })?;

        self.audit
            .write(
                AuditEntry::created(
                    AuditEntity::Suggestion,
                    suggestion.id,
                    AuditEntry::snapshot(&suggestion),
                )
                .by(actor),
            )
            .await;
        tracing::info!(suggestion_id = %suggestion.id, "Suggestion created: {}", suggestion.title);

        Ok(after_commit(self.board(place_id).await))
    }

    pub async fn delete(
        &self,
        actor: Option<Uuid>,
        place_id: Uuid,
        id: Uuid,
    ) -> Result<Committed<SuggestionBoard>, AppError> {
        let existing = self.store.find_suggestion(id).await.map_err(|e| {
            tracing::error!(suggestion_id = %id, "Failed to look up suggestion: {}", e);
            e.into_app_error(AppError::DeleteFailed)
        })?;
        if let Some(existing) = existing {
            if existing.suggestion.place_id != place_id {
                tracing::warn!(
                    suggestion_id = %id,
                    place_id = %place_id,
                    "Rejected delete of suggestion from another place"
                );
                return Err(AppError::NotFound);
            }
        }

        self.store.delete_suggestion(id).await.map_err(|e| {
            tracing::error!(suggestion_id = %id, "Failed to delete suggestion: {}", e);
            e.into_app_error(AppError::DeleteFailed)
        })?;

        self.audit
            .write(AuditEntry::deleted(AuditEntity::Suggestion, id, None).by(actor))
            .await;
        tracing::info!(suggestion_id = %id, "Suggestion deleted");

        Ok(after_commit(self.board(place_id).await))
    }
}

pub(crate) async fn load_board(
    store: &dyn TripStore,
    place_id: Uuid,
) -> Result<SuggestionBoard, AppError> {
    let suggestions = store.list_suggestions(place_id).await.map_err(|e| {
        tracing::error!(place_id = %place_id, "Failed to load suggestions: {}", e);
        e.into_app_error(AppError::LoadFailed)
    })?;
    Ok(SuggestionBoard::new(place_id, suggestions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakeStore, RecordingAudit};
    use crate::domain::{AuditAction, Category};

    fn form(title: &str, link: &str) -> SuggestionForm {
        SuggestionForm {
            title: title.to_string(),
            category: Category::Food,
            link: link.to_string(),
            ..SuggestionForm::default()
        }
    }

    #[tokio::test]
    async fn test_create_refreshes_board() {
        let store = Arc::new(FakeStore::default());
        let audit = Arc::new(RecordingAudit::default());
        let place = store.seed_place("Bergen");
        let service = ManageSuggestions::new(store.clone(), audit.clone());
        let user = Uuid::new_v4();

        let board = service
            .create(Some(user), place, form("Fischmarkt", "https://fisketorget.no"))
            .await
            .unwrap()
            .refreshed
            .unwrap();

        assert_eq!(board.place_id, place);
        assert_eq!(board.suggestions.len(), 1);
        let created = &board.suggestions[0];
        assert_eq!(created.suggestion.title, "Fischmarkt");
        assert_eq!(created.suggestion.created_by, Some(user));
        assert_eq!(created.score, 0);

        let entry = audit.entries().pop().unwrap();
        assert_eq!(entry.action, AuditAction::Create);
        assert_eq!(entry.entity, AuditEntity::Suggestion);
        assert_eq!(entry.entity_id, created.id());
        assert_eq!(entry.after.unwrap()["category"], "food");
    }

    #[tokio::test]
    async fn test_invalid_link_blocks_store_call() {
        let store = Arc::new(FakeStore::default());
        let audit = Arc::new(RecordingAudit::default());
        let service = ManageSuggestions::new(store.clone(), audit.clone());

        let err = service
            .create(None, Uuid::new_v4(), form("Fischmarkt", "fisketorget.no"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.calls(), 0);
        assert!(audit.entries().is_empty());
    }

    #[tokio::test]
    async fn test_missing_title_rejected() {
        let store = Arc::new(FakeStore::default());
        let service = ManageSuggestions::new(store.clone(), Arc::new(RecordingAudit::default()));

        let err = service
            .create(None, Uuid::new_v4(), form("", ""))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Titel ist erforderlich");
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_and_audits() {
        let store = Arc::new(FakeStore::default());
        let audit = Arc::new(RecordingAudit::default());
        let place = store.seed_place("Bergen");
        let keep = store.seed_suggestion(place, "Fløyen");
        let drop = store.seed_suggestion(place, "Ulriken");
        let service = ManageSuggestions::new(store.clone(), audit.clone());

        let board = service.delete(None, place, drop).await.unwrap().refreshed.unwrap();

        assert_eq!(board.suggestions.len(), 1);
        assert_eq!(board.suggestions[0].id(), keep);
        assert_eq!(
            audit.entries(),
            vec![AuditEntry::deleted(AuditEntity::Suggestion, drop, None)]
        );
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_board() {
        let store = Arc::new(FakeStore::default());
        let audit = Arc::new(RecordingAudit::default());
        let place = store.seed_place("Bergen");
        let id = store.seed_suggestion(place, "Fløyen");
        let service = ManageSuggestions::new(store.clone(), audit.clone());
        store.fail_next("timeout");

        let err = service.delete(None, place, id).await.unwrap_err();

        assert_eq!(err.user_message(), "Fehler beim Löschen");
        assert!(audit.entries().is_empty());
        assert_eq!(service.board(place).await.unwrap().suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_from_other_place_is_rejected() {
        let store = Arc::new(FakeStore::default());
        let audit = Arc::new(RecordingAudit::default());
        let bergen = store.seed_place("Bergen");
        let oslo = store.seed_place("Oslo");
        let id = store.seed_suggestion(oslo, "Operahuset");
        let service = ManageSuggestions::new(store.clone(), audit.clone());

        let err = service.delete(None, bergen, id).await.unwrap_err();

        assert_eq!(err, AppError::NotFound);
        assert!(audit.entries().is_empty());
        assert_eq!(service.board(oslo).await.unwrap().suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_failure_after_create() {
        let store = Arc::new(FakeStore::default());
        let audit = Arc::new(RecordingAudit::default());
        let place = store.seed_place("Bergen");
        let service = ManageSuggestions::new(store.clone(), audit.clone());
        store.fail_after(1, "connection reset");

        let committed = service
            .create(None, place, form("Fischmarkt", ""))
            .await
            .unwrap();

        assert!(committed.is_stale());
        assert_eq!(audit.entries().len(), 1);
        let board = service.board(place).await.unwrap();
        assert_eq!(board.suggestions.len(), 1);
        assert_eq!(board.suggestions[0].suggestion.title, "Fischmarkt");
    }
}
