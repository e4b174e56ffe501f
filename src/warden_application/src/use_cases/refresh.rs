use chrono::Utc;
use warden_core::{SessionStore, SessionStoreError};

use crate::policy::AuthPolicy;
use crate::tokens::{TokenError, TokenService};

/// Result of a refresh: a fresh access token, plus a new refresh token only
/// when the session was rotated. The caller re-sets the refresh cookie only
/// in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshedTokens {
    pub access_token: String,
    pub new_refresh_token: Option<String>,
}

/// Error types for the refresh use case
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
    #[error("Session expired")]
    SessionExpired,
    #[error("Session store error: {0}")]
    SessionStoreError(SessionStoreError),
    #[error("{0}")]
    TokenError(TokenError),
}

impl From<TokenError> for RefreshError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Expired | TokenError::Invalid => RefreshError::InvalidRefreshToken,
            other => RefreshError::TokenError(other),
        }
    }
}

impl From<SessionStoreError> for RefreshError {
    fn from(error: SessionStoreError) -> Self {
        match error {
            // a deleted session means every token bound to it is revoked
            SessionStoreError::SessionNotFound => RefreshError::SessionExpired,
            other => RefreshError::SessionStoreError(other),
        }
    }
}

/// Refresh use case - exchanges a refresh token for a new access token,
/// extending the session when it is close to expiry.
pub struct RefreshUseCase<'a, S>
where
    S: SessionStore,
{
    session_store: &'a S,
    tokens: &'a TokenService,
    policy: &'a AuthPolicy,
}

impl<'a, S> RefreshUseCase<'a, S>
where
    S: SessionStore,
{
    pub fn new(session_store: &'a S, tokens: &'a TokenService, policy: &'a AuthPolicy) -> Self {
        Self {
            session_store,
            tokens,
            policy,
        }
    }

    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &str) -> Result<RefreshedTokens, RefreshError> {
        let claims = self.tokens.verify_refresh_token(refresh_token)?;

        let session = self.session_store.get_session(claims.session_id).await?;
        let now = Utc::now();
        if session.is_expired_at(now) {
            return Err(RefreshError::SessionExpired);
        }

        // Two concurrent refreshes may both rotate; last write wins on
        // expires_at and both issued tokens stay bound to the session.
        let new_refresh_token = if session.needs_rotation(now, self.policy.session_rotation_threshold)
        {
            let expires_at = now + self.policy.session_ttl;
            self.session_store
                .extend_session(session.id, expires_at)
                .await?;
            Some(self.tokens.sign_refresh_token(session.id)?)
        } else {
            None
        };

        let access_token = self.tokens.sign_access_token(session.user_id, session.id)?;

        Ok(RefreshedTokens {
            access_token,
            new_refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use warden_core::{Session, SessionId, UserId};

    use super::*;
    use crate::use_cases::test_support::*;

    #[tokio::test]
    async fn test_refresh_far_from_expiry_issues_access_token_only() {
        let session_store = FakeSessionStore::default();
        let tokens = test_token_service();
        let policy = test_policy();

        // 25 hours of lifetime left: outside the 24h rotation window
        let session = Session::new(UserId::new(), None, Duration::hours(25));
        session_store.insert(session.clone()).await;
        let refresh_token = tokens.sign_refresh_token(session.id).unwrap();

        let use_case = RefreshUseCase::new(&session_store, &tokens, &policy);
        let result = use_case.execute(&refresh_token).await.unwrap();

        assert!(result.new_refresh_token.is_none());
        let claims = tokens.verify_access_token(&result.access_token).unwrap();
        assert_eq!(claims.session_id, session.id);
        assert_eq!(claims.user_id, session.user_id);

        // expiry untouched
        let stored = session_store.get(session.id).await.unwrap();
        assert_eq!(stored.expires_at, session.expires_at);
    }

    #[tokio::test]
    async fn test_refresh_near_expiry_rotates_session_and_token() {
        let session_store = FakeSessionStore::default();
        let tokens = test_token_service();
        let policy = test_policy();

        // 23 hours of lifetime left: inside the rotation window
        let session = Session::new(UserId::new(), None, Duration::hours(23));
        session_store.insert(session.clone()).await;
        let refresh_token = tokens.sign_refresh_token(session.id).unwrap();

        let use_case = RefreshUseCase::new(&session_store, &tokens, &policy);
        let result = use_case.execute(&refresh_token).await.unwrap();

        let new_refresh_token = result.new_refresh_token.expect("rotation expected");
        let claims = tokens.verify_refresh_token(&new_refresh_token).unwrap();
        assert_eq!(claims.session_id, session.id);

        // session lifetime extended to a full ttl
        let stored = session_store.get(session.id).await.unwrap();
        assert!(stored.expires_at > session.expires_at);
    }

    #[tokio::test]
    async fn test_refresh_with_expired_session_is_rejected() {
        let session_store = FakeSessionStore::default();
        let tokens = test_token_service();
        let policy = test_policy();

        let session = Session::new(UserId::new(), None, Duration::hours(-1));
        session_store.insert(session.clone()).await;
        let refresh_token = tokens.sign_refresh_token(session.id).unwrap();

        let use_case = RefreshUseCase::new(&session_store, &tokens, &policy);
        let result = use_case.execute(&refresh_token).await;

        assert!(matches!(result, Err(RefreshError::SessionExpired)));
    }

    #[tokio::test]
    async fn test_refresh_with_deleted_session_is_rejected() {
        // valid, unexpired token whose session no longer exists
        let session_store = FakeSessionStore::default();
        let tokens = test_token_service();
        let policy = test_policy();

        let refresh_token = tokens.sign_refresh_token(SessionId::new()).unwrap();

        let use_case = RefreshUseCase::new(&session_store, &tokens, &policy);
        let result = use_case.execute(&refresh_token).await;

        assert!(matches!(result, Err(RefreshError::SessionExpired)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage_and_access_tokens() {
        let session_store = FakeSessionStore::default();
        let tokens = test_token_service();
        let policy = test_policy();

        let use_case = RefreshUseCase::new(&session_store, &tokens, &policy);

        let garbage = use_case.execute("not-a-token").await;
        assert!(matches!(garbage, Err(RefreshError::InvalidRefreshToken)));

        // an access token must not pass as a refresh token
        let access_token = tokens
            .sign_access_token(UserId::new(), SessionId::new())
            .unwrap();
        let wrong_kind = use_case.execute(&access_token).await;
        assert!(matches!(wrong_kind, Err(RefreshError::InvalidRefreshToken)));
    }
}
