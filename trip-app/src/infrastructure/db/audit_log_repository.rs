use super::entities::audit_log;
use crate::application::AuditLog;
use crate::domain::AuditEntry;
use async_trait::async_trait;
use sea_orm::{entity::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuditLogRepository {
    db: DatabaseConnection,
}

impl AuditLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, entry: &AuditEntry) -> Result<audit_log::Model, DbErr> {
        let active = audit_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            action: Set(entry.action.as_str().to_string()),
            entity_type: Set(entry.entity.as_str().to_string()),
            entity_id: Set(entry.entity_id),
            before_data: Set(entry.before.clone()),
            after_data: Set(entry.after.clone()),
            user_id: Set(entry.user_id),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }
}

#[async_trait]
impl AuditLog for AuditLogRepository {
    async fn write(&self, entry: AuditEntry) {
        if let Err(e) = self.create(&entry).await {
            tracing::warn!(
                entity_id = %entry.entity_id,
                "Failed to write audit log ({} {}): {}",
                entry.action.as_str(),
                entry.entity.as_str(),
                e
            );
        }
    }
}
