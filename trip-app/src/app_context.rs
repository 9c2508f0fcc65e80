use crate::application::{
    AuditLog, CastVote, ManagePlaces, ManageSuggestions, TripStore, UserDirectory,
};
use crate::infrastructure::db::{self, AuditLogRepository, DbTripStore};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub places: Arc<ManagePlaces>,
    pub suggestions: Arc<ManageSuggestions>,
    pub cast_vote: Arc<CastVote>,
    pub users: Arc<UserDirectory>,
}

impl AppContext {
    pub fn new(store: Arc<dyn TripStore>, audit: Arc<dyn AuditLog>) -> Self {
        Self {
            places: Arc::new(ManagePlaces::new(store.clone(), audit.clone())),
            suggestions: Arc::new(ManageSuggestions::new(store.clone(), audit.clone())),
            cast_vote: Arc::new(CastVote::new(store.clone(), audit)),
            users: Arc::new(UserDirectory::new(store)),
        }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        let store = Arc::new(DbTripStore::new(db.clone()));
        let audit = Arc::new(AuditLogRepository::new(db));
        Self::new(store, audit)
    }

    /// Connects, applies the schema and wires the use cases.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let conn = db::create_connection(database_url).await?;
        db::run_migrations(&conn).await?;
        tracing::info!("Database ready");
        Ok(Self::from_db(conn))
    }
}
