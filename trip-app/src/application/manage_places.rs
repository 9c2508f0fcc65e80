use std::sync::Arc;

use serde_json::json;
use trip_errors::AppError;
use uuid::Uuid;

use super::after_commit;
use super::interfaces::{AuditLog, TripStore};
use crate::domain::{AuditEntity, AuditEntry, Committed, Place, PlaceForm};
use crate::infrastructure::security::InputSanitizer;

pub struct ManagePlaces {
    store: Arc<dyn TripStore>,
    audit: Arc<dyn AuditLog>,
}

impl ManagePlaces {
    pub fn new(store: Arc<dyn TripStore>, audit: Arc<dyn AuditLog>) -> Self {
        Self { store, audit }
    }

    pub async fn list(&self) -> Result<Vec<Place>, AppError> {
        self.store.list_places().await.map_err(|e| {
            tracing::error!("Failed to load places: {}", e);
            e.into_app_error(AppError::LoadFailed)
        })
    }

    /// Creates a place and returns the refreshed list.
    pub async fn create(
        &self,
        actor: Option<Uuid>,
        form: PlaceForm,
    ) -> Result<Committed<Vec<Place>>, AppError> {
        let draft = InputSanitizer::validate_place(&form)?;

        let place = self.store.insert_place(&draft, actor).await.map_err(|e| {
            tracing::error!("Failed to create place: {}", e);
            e.into_app_error(AppError::CreateFailed)
        })?;

        self.audit
            .write(
                AuditEntry::created(AuditEntity::Place, place.id, AuditEntry::snapshot(&place))
                    .by(actor),
            )
            .await;
        tracing::info!(place_id = %place.id, "Place created: {}", place.name);

        Ok(after_commit(self.list().await))
    }

    pub async fn rename(
        &self,
        actor: Option<Uuid>,
        id: Uuid,
        form: PlaceForm,
    ) -> Result<Committed<Vec<Place>>, AppError> {
        let draft = InputSanitizer::validate_place(&form)?;

        let before = self
            .store
            .find_place(id)
            .await
            .map_err(|e| e.into_app_error(AppError::UpdateFailed))?
            .ok_or(AppError::NotFound)?;

        self.store.update_place(id, &draft).await.map_err(|e| {
            tracing::error!(place_id = %id, "Failed to update place: {}", e);
            e.into_app_error(AppError::UpdateFailed)
        })?;

        self.audit
            .write(
                AuditEntry::updated(
                    AuditEntity::Place,
                    id,
                    AuditEntry::snapshot(&before),
                    Some(json!({ "name": draft.name, "region": draft.region })),
                )
                .by(actor),
            )
            .await;
        tracing::info!(place_id = %id, "Place updated");

        Ok(after_commit(self.list().await))
    }

    pub async fn delete(
        &self,
        actor: Option<Uuid>,
        id: Uuid,
    ) -> Result<Committed<Vec<Place>>, AppError> {
        self.store.delete_place(id).await.map_err(|e| {
            tracing::error!(place_id = %id, "Failed to delete place: {}", e);
            e.into_app_error(AppError::DeleteFailed)
        })?;

        self.audit
            .write(AuditEntry::deleted(AuditEntity::Place, id, None).by(actor))
            .await;
        tracing::info!(place_id = %id, "Place deleted");

        Ok(after_commit(self.list().await))
    }
}
