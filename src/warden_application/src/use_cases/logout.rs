use warden_core::{SessionStore, SessionStoreError};

use crate::tokens::TokenService;

/// Error types for the logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Session store error: {0}")]
    SessionStoreError(SessionStoreError),
}

/// Logout use case - best-effort session teardown. An unreadable token is
/// not an error: the caller clears its cookies either way.
pub struct LogoutUseCase<'a, S>
where
    S: SessionStore,
{
    session_store: &'a S,
    tokens: &'a TokenService,
}

impl<'a, S> LogoutUseCase<'a, S>
where
    S: SessionStore,
{
    pub fn new(session_store: &'a S, tokens: &'a TokenService) -> Self {
        Self {
            session_store,
            tokens,
        }
    }

    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, access_token: &str) -> Result<(), LogoutError> {
        // expiry is ignored on purpose: an expired access token still names
        // the session that should be torn down
        let Some(claims) = self.tokens.peek_access_token(access_token) else {
            return Ok(());
        };

        match self.session_store.delete_session(claims.session_id).await {
            Ok(()) | Err(SessionStoreError::SessionNotFound) => Ok(()),
            Err(other) => Err(LogoutError::SessionStoreError(other)),
        }
    }
}
