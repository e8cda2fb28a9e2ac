use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self), fields(user_id = %user.user_id, email = %user.email))]
    async fn save_user(&self, user: User) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(user.user_id.clone(), user.clone());
        debug!(
            user_id = %user.user_id,
            email = %user.email,
            "User saved to memory storage"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = user_id))]
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.get(user_id).cloned();
        match &user {
            Some(u) => debug!(user_id = %u.user_id, "User found in storage"),
            None => trace!(user_id = user_id, "User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = user_id, email = email))]
    async fn find_by_user_id_or_email(&self, user_id: &str, email: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage
            .values()
            .find(|u| u.user_id == user_id || u.email == email)
            .cloned();
        Ok(user)
    }

    #[instrument(skip(self, image), fields(user_id = user_id))]
    async fn update_profile_image(&self, user_id: &str, image: String) -> Result<Option<User>> {
        // Single write-lock section, so the overwrite is atomic per record.
        let mut storage = self.storage.write().await;
        let user = match storage.get_mut(user_id) {
            Some(u) => {
                u.profile_image = Some(image);
                debug!(user_id = %u.user_id, "Profile image updated in storage");
                Some(u.clone())
            }
            None => {
                trace!(user_id = user_id, "User not found for image update");
                None
            }
        };
        Ok(user)
    }
}
