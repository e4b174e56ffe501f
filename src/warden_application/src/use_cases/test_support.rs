//! In-memory fakes shared by the use-case tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use warden_core::{
    Email, EmailClient, Password, PasswordHashError, PasswordHasher, Session, SessionId,
    SessionStore, SessionStoreError, User, UserId, UserStore, UserStoreError, VerificationCode,
    VerificationCodeId, VerificationCodeKind, VerificationCodeStore, VerificationCodeStoreError,
};

use crate::policy::AuthPolicy;
use crate::tokens::{TokenConfig, TokenService};

pub(crate) fn test_token_service() -> TokenService {
    TokenService::new(
        TokenConfig::new(
            Secret::from("test-access-secret".to_string()),
            chrono::Duration::minutes(15),
        ),
        TokenConfig::new(
            Secret::from("test-refresh-secret".to_string()),
            chrono::Duration::days(30),
        ),
    )
}

pub(crate) fn test_policy() -> AuthPolicy {
    AuthPolicy::with_client_url("http://localhost:3000")
}

pub(crate) fn test_email(value: &str) -> Email {
    Email::try_from(Secret::from(value.to_string())).unwrap()
}

pub(crate) fn test_password(value: &str) -> Password {
    Password::try_from(Secret::from(value.to_string())).unwrap()
}

#[derive(Default, Clone)]
pub(crate) struct FakeUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl FakeUserStore {
    pub(crate) async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id(), user);
    }

    pub(crate) async fn get(&self, id: UserId) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }
}

#[async_trait::async_trait]
impl UserStore for FakeUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.id(), user);
        Ok(())
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn mark_verified(&self, id: UserId) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.set_verified();
        Ok(user.clone())
    }

    async fn set_password_hash(
        &self,
        id: UserId,
        password_hash: Secret<String>,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.set_password_hash(password_hash);
        Ok(user.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct FakeSessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl FakeSessionStore {
    pub(crate) async fn insert(&self, session: Session) {
        self.sessions.write().await.insert(session.id, session);
    }

    pub(crate) async fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub(crate) async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub(crate) async fn count_for_user(&self, user_id: UserId) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|session| session.user_id == user_id)
            .count()
    }
}

#[async_trait::async_trait]
impl SessionStore for FakeSessionStore {
    async fn add_session(&self, session: Session) -> Result<(), SessionStoreError> {
        self.sessions.write().await.insert(session.id, session);
        Ok(())
    }

    async fn get_session(&self, id: SessionId) -> Result<Session, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::SessionNotFound)
    }

    async fn extend_session(
        &self,
        id: SessionId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionStoreError::SessionNotFound)?;
        session.expires_at = expires_at;
        Ok(())
    }

    async fn delete_session(&self, id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .ok_or(SessionStoreError::SessionNotFound)?;
        Ok(())
    }

    async fn delete_sessions_for_user(&self, user_id: UserId) -> Result<u64, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.user_id != user_id);
        Ok((before - sessions.len()) as u64)
    }
}

#[derive(Default, Clone)]
pub(crate) struct FakeVerificationCodeStore {
    codes: Arc<RwLock<HashMap<VerificationCodeId, VerificationCode>>>,
}

impl FakeVerificationCodeStore {
    pub(crate) async fn insert(&self, code: VerificationCode) {
        self.codes.write().await.insert(code.id, code);
    }

    pub(crate) async fn get(&self, id: VerificationCodeId) -> Option<VerificationCode> {
        self.codes.read().await.get(&id).cloned()
    }
}

#[async_trait::async_trait]
impl VerificationCodeStore for FakeVerificationCodeStore {
    async fn add_code(&self, code: VerificationCode) -> Result<(), VerificationCodeStoreError> {
        self.codes.write().await.insert(code.id, code);
        Ok(())
    }

    async fn find_valid_code(
        &self,
        id: VerificationCodeId,
        kind: VerificationCodeKind,
    ) -> Result<VerificationCode, VerificationCodeStoreError> {
        self.codes
            .read()
            .await
            .get(&id)
            .filter(|code| code.kind == kind && !code.is_expired_at(Utc::now()))
            .cloned()
            .ok_or(VerificationCodeStoreError::CodeNotFound)
    }

    async fn delete_code(
        &self,
        id: VerificationCodeId,
    ) -> Result<(), VerificationCodeStoreError> {
        self.codes
            .write()
            .await
            .remove(&id)
            .ok_or(VerificationCodeStoreError::CodeNotFound)?;
        Ok(())
    }

    async fn count_codes_created_since(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        since: DateTime<Utc>,
    ) -> Result<u64, VerificationCodeStoreError> {
        let count = self
            .codes
            .read()
            .await
            .values()
            .filter(|code| {
                code.user_id == user_id && code.kind == kind && code.created_at > since
            })
            .count();
        Ok(count as u64)
    }
}

/// Reversible stand-in for the real hasher so tests stay fast.
#[derive(Default, Clone)]
pub(crate) struct FakePasswordHasher;

#[async_trait::async_trait]
impl PasswordHasher for FakePasswordHasher {
    async fn hash(&self, password: Password) -> Result<Secret<String>, PasswordHashError> {
        Ok(Secret::from(format!(
            "fake-hash:{}",
            password.as_ref().expose_secret()
        )))
    }

    async fn matches(
        &self,
        candidate: &Password,
        password_hash: &Secret<String>,
    ) -> Result<bool, PasswordHashError> {
        let expected = format!("fake-hash:{}", candidate.as_ref().expose_secret());
        Ok(expected == *password_hash.expose_secret())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

#[derive(Default, Clone)]
pub(crate) struct FakeEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: Arc<AtomicBool>,
}

impl FakeEmailClient {
    pub(crate) fn failing() -> Self {
        let client = Self::default();
        client.fail.store(true, Ordering::SeqCst);
        client
    }

    pub(crate) async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for FakeEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("email provider unavailable".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
