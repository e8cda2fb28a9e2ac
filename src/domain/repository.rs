use crate::domain::booking::Booking;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save_user(&self, user: User) -> Result<()>;
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>>;
    /// Single existence probe matching either field, used by registration.
    async fn find_by_user_id_or_email(&self, user_id: &str, email: &str) -> Result<Option<User>>;
    /// Atomically overwrites `profile_image` for one user, returning the
    /// updated record, or `None` if the user does not exist.
    async fn update_profile_image(&self, user_id: &str, image: String) -> Result<Option<User>>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn save_booking(&self, booking: Booking) -> Result<()>;
    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<Booking>>;
}

/// Hash-and-compare capability for stored credentials. Keeps the hashing
/// scheme out of the application layer.
pub trait CredentialVerifier: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool>;
}
