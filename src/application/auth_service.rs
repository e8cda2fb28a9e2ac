use crate::domain::error::DomainError;
use crate::domain::repository::{CredentialVerifier, UserRepository};
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::security::issue_token;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Login result carried back to the client for immediate display.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub name: String,
    pub profile_image: Option<String>,
}

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    verifier: Arc<dyn CredentialVerifier>,
    jwt_secret: String,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(
        user_repository: Arc<R>,
        verifier: Arc<dyn CredentialVerifier>,
        jwt_secret: String,
    ) -> Self {
        Self {
            user_repository,
            verifier,
            jwt_secret,
        }
    }

    #[instrument(skip(self, req), fields(user_id = %req.user_id, email = %req.email))]
    pub async fn register(&self, req: RegisterRequest) -> Result<()> {
        // One existence probe covering both unique fields
        if self
            .user_repository
            .find_by_user_id_or_email(&req.user_id, &req.email)
            .await?
            .is_some()
        {
            warn!(user_id = %req.user_id, email = %req.email, "Duplicate registration attempt");
            return Err(DomainError::DuplicateUser.into());
        }

        let password_hash = self.verifier.hash(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let user = User {
            name: req.user_id.clone(),
            user_id: req.user_id,
            email: req.email,
            password_hash,
            profile_image: None,
        };

        debug!(user_id = %user.user_id, "Saving user to repository");
        self.user_repository.save_user(user.clone()).await?;

        info!(user_id = %user.user_id, email = %user.email, "User registered successfully");
        Ok(())
    }

    #[instrument(skip(self, req), fields(user_id = %req.user_id))]
    pub async fn login(&self, req: LoginRequest) -> Result<LoginOutcome> {
        let user = self
            .user_repository
            .find_by_user_id(&req.user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %req.user_id, "User not found during login");
                DomainError::UserNotFound
            })?;

        let is_valid = self
            .verifier
            .verify(&req.password, &user.password_hash)
            .map_err(|e| {
                error!(error = %e, "Failed to verify password");
                DomainError::Internal(format!("Failed to verify password: {}", e))
            })?;

        if !is_valid {
            warn!(user_id = %user.user_id, "Incorrect password during login");
            return Err(DomainError::InvalidCredential.into());
        }

        let token = issue_token(&user.user_id, &self.jwt_secret).map_err(|e| {
            error!(error = %e, "Failed to issue token");
            DomainError::Internal(format!("Failed to issue token: {}", e))
        })?;

        info!(user_id = %user.user_id, "Login successful");
        Ok(LoginOutcome {
            token,
            name: user.name,
            profile_image: user.profile_image,
        })
    }
}
