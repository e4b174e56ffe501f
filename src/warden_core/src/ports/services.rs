use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{email::Email, password::Password};

#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Failed to compute password hash: {0}")]
    HashingFailed(String),
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

/// One-way password hashing capability. The algorithm is an implementation
/// detail of the adapter; substitutability is the contract.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<Secret<String>, PasswordHashError>;
    async fn matches(
        &self,
        candidate: &Password,
        password_hash: &Secret<String>,
    ) -> Result<bool, PasswordHashError>;
}
