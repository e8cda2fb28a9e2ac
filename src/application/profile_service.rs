use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct ProfileService<R: UserRepository> {
    user_repository: Arc<R>,
}

impl<R: UserRepository> ProfileService<R> {
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    /// Looks up the profile for a guard-resolved identity. A valid token
    /// whose user no longer exists is a data inconsistency, reported as
    /// user-not-found.
    #[instrument(skip(self), fields(user_id = user_id))]
    pub async fn get_profile(&self, user_id: &str) -> Result<User> {
        self.user_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user_id, "Valid token but no matching user record");
                DomainError::UserNotFound.into()
            })
    }

    /// Encodes the upload as an inline data URL and overwrites the caller's
    /// profile image, returning the stored value.
    #[instrument(skip(self, bytes), fields(user_id = user_id, content_type = content_type, size = bytes.len()))]
    pub async fn update_profile_image(
        &self,
        user_id: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String> {
        let image_data = format!("data:{};base64,{}", content_type, STANDARD.encode(bytes));

        let updated = self
            .user_repository
            .update_profile_image(user_id, image_data.clone())
            .await?;
        if updated.is_none() {
            warn!(user_id = user_id, "Image update for unknown user");
            return Err(DomainError::UserNotFound.into());
        }

        info!(user_id = user_id, "Profile image updated");
        Ok(image_data)
    }
}
