use std::sync::Arc;

use trip_errors::AppError;
use uuid::Uuid;

use super::interfaces::TripStore;
use crate::domain::User;
use crate::infrastructure::security::InputSanitizer;

/// The travellers that can be picked as the acting user.
pub struct UserDirectory {
    store: Arc<dyn TripStore>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn TripStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.store.list_users().await.map_err(|e| {
            tracing::error!("Failed to load users: {}", e);
            e.into_app_error(AppError::LoadFailed)
        })
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.store
            .find_user(id)
            .await
            .map_err(|e| e.into_app_error(AppError::LoadFailed))
    }

    pub async fn require(&self, id: Uuid) -> Result<User, AppError> {
        self.find(id).await?.ok_or(AppError::NotFound)
    }

    /// Adds a traveller. Names are not unique.
    pub async fn create(&self, name: &str) -> Result<User, AppError> {
        let name = InputSanitizer::validate_user_name(name)?;

        let user = self.store.insert_user(&name).await.map_err(|e| {
            tracing::error!("Failed to create user: {}", e);
            e.into_app_error(AppError::CreateFailed)
        })?;
        tracing::info!(user_id = %user.id, "User created: {}", user.name);
        Ok(user)
    }

    /// Creates every listed name that has no user yet. Returns how many were
    /// added.
    pub async fn ensure<I, S>(&self, names: I) -> Result<usize, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known: Vec<String> = self.list().await?.into_iter().map(|u| u.name).collect();
        let mut added = 0;
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || known.iter().any(|k| k == name) {
                continue;
            }
            self.create(name).await?;
            known.push(name.to_string());
            added += 1;
        }
        Ok(added)
    }
}
