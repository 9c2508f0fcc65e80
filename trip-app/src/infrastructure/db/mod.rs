pub mod entities;
mod audit_log_repository;
mod place_repository;
mod suggestion_repository;
mod trip_store;
mod user_repository;
mod vote_repository;

pub use audit_log_repository::AuditLogRepository;
pub use place_repository::PlaceRepository;
pub use suggestion_repository::SuggestionRepository;
pub use trip_store::DbTripStore;
pub use user_repository::UserRepository;
pub use vote_repository::VoteRepository;

use crate::application::StoreError;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");

    for statement in migration.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        if let Err(e) = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                statement.to_string(),
            ))
            .await
        {
            if !is_already_exists(&e) {
                tracing::error!("Migration statement failed: {}", e);
                return Err(e);
            }
            tracing::warn!("Migration statement skipped: {}", e);
        }
    }

    Ok(())
}

/// Schema objects left by an earlier run.
fn is_already_exists(err: &DbErr) -> bool {
    err.to_string().contains("already exists")
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_maps_to_not_found() {
        let err: StoreError = DbErr::RecordNotFound("Vote not found".to_string()).into();
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn test_other_errors_keep_message() {
        let err: StoreError = DbErr::Custom("connection refused".to_string()).into();
        assert!(matches!(err, StoreError::Backend(msg) if msg.contains("connection refused")));
    }

    #[test]
    fn test_only_existing_objects_are_skipped() {
        let existing = DbErr::Custom(r#"relation "votes" already exists"#.to_string());
        assert!(is_already_exists(&existing));

        let denied = DbErr::Custom("permission denied for schema public".to_string());
        assert!(!is_already_exists(&denied));
    }

    #[test]
    fn test_migration_creates_all_tables() {
        let migration = include_str!("../../../../migrations/001_initial.sql");
        for table in ["users", "places", "suggestions", "votes", "audit_logs"] {
            assert!(
                migration.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")),
                "missing table {table}"
            );
        }
        assert!(migration.contains("PRIMARY KEY (suggestion_id, user_id)"));
    }
}
