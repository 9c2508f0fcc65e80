use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditEntity {
    Place,
    Suggestion,
    Vote,
}

impl AuditEntity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::Suggestion => "suggestion",
            Self::Vote => "vote",
        }
    }
}

/// One row of the audit trail: what changed, and the state on either side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub entity: AuditEntity,
    pub entity_id: Uuid,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub user_id: Option<Uuid>,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        entity: AuditEntity,
        entity_id: Uuid,
        before: Option<Value>,
        after: Option<Value>,
    ) -> Self {
        Self {
            action,
            entity,
            entity_id,
            before,
            after,
            user_id: None,
        }
    }

    pub fn created(entity: AuditEntity, entity_id: Uuid, after: Option<Value>) -> Self {
        Self::new(AuditAction::Create, entity, entity_id, None, after)
    }

    pub fn updated(
        entity: AuditEntity,
        entity_id: Uuid,
        before: Option<Value>,
        after: Option<Value>,
    ) -> Self {
        Self::new(AuditAction::Update, entity, entity_id, before, after)
    }

    pub fn deleted(entity: AuditEntity, entity_id: Uuid, before: Option<Value>) -> Self {
        Self::new(AuditAction::Delete, entity, entity_id, before, None)
    }

    pub fn by(mut self, user_id: Option<Uuid>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn snapshot<T: Serialize>(value: &T) -> Option<Value> {
        serde_json::to_value(value).ok()
    }
}
