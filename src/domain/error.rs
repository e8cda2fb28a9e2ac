use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User ID or Email already exists")]
    DuplicateUser,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    InvalidCredential,
    #[error("Unauthorized access")]
    Forbidden,
    #[error("Internal error: {0}")]
    Internal(String),
}
