use super::entities::{user, User};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<user::Model>, DbErr> {
        User::find()
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(&self.db).await
    }

    pub async fn create(&self, name: &str) -> Result<user::Model, DbErr> {
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }

    pub async fn find_many(&self, ids: Vec<Uuid>) -> Result<Vec<user::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        User::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
    }
}
