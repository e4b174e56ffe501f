use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    session::{Session, SessionId},
    user::{User, UserId},
    verification_code::{VerificationCode, VerificationCodeId, VerificationCodeKind},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Credential store. Email uniqueness is enforced by `add_user`; password
/// comparison is not done here but through the `PasswordHasher` port.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError>;
    /// Flip the verified flag; returns the updated user.
    async fn mark_verified(&self, id: UserId) -> Result<User, UserStoreError>;
    /// Replace the stored password hash; returns the updated user.
    async fn set_password_hash(
        &self,
        id: UserId,
        password_hash: Secret<String>,
    ) -> Result<User, UserStoreError>;
}

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for SessionStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SessionNotFound, Self::SessionNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn add_session(&self, session: Session) -> Result<(), SessionStoreError>;
    async fn get_session(&self, id: SessionId) -> Result<Session, SessionStoreError>;
    /// Move the session's expiry forward (refresh rotation). Last write
    /// wins under concurrent refreshes.
    async fn extend_session(
        &self,
        id: SessionId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError>;
    async fn delete_session(&self, id: SessionId) -> Result<(), SessionStoreError>;
    /// Bulk revocation; returns the number of sessions removed.
    async fn delete_sessions_for_user(&self, user_id: UserId) -> Result<u64, SessionStoreError>;
}

// VerificationCodeStore port trait and errors
#[derive(Debug, Error)]
pub enum VerificationCodeStoreError {
    #[error("Verification code not found")]
    CodeNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for VerificationCodeStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::CodeNotFound, Self::CodeNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    async fn add_code(&self, code: VerificationCode) -> Result<(), VerificationCodeStoreError>;
    /// The only valid-use path: lookup by id and kind, rejecting expired
    /// codes as if they did not exist.
    async fn find_valid_code(
        &self,
        id: VerificationCodeId,
        kind: VerificationCodeKind,
    ) -> Result<VerificationCode, VerificationCodeStoreError>;
    async fn delete_code(&self, id: VerificationCodeId) -> Result<(), VerificationCodeStoreError>;
    /// Count codes of `kind` created for `user_id` after `since`; feeds the
    /// rate limiter.
    async fn count_codes_created_since(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        since: DateTime<Utc>,
    ) -> Result<u64, VerificationCodeStoreError>;
}
