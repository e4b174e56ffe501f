use warden_core::{
    Email, Password, PasswordHashError, PasswordHasher, Session, SessionStore, SessionStoreError,
    UserStore, UserStoreError,
};

use crate::policy::AuthPolicy;
use crate::tokens::{TokenError, TokenService};
use crate::use_cases::AuthenticatedUser;

/// Error types for the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Deliberately covers both unknown email and wrong password so the
    /// caller cannot tell which field was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Session store error: {0}")]
    SessionStoreError(#[from] SessionStoreError),
    #[error("{0}")]
    PasswordHashError(#[from] PasswordHashError),
    #[error("{0}")]
    TokenError(#[from] TokenError),
}

impl From<UserStoreError> for LoginError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => LoginError::InvalidCredentials,
            other => LoginError::UserStoreError(other),
        }
    }
}

/// Login use case - verifies credentials and opens a fresh session.
pub struct LoginUseCase<'a, U, S, H>
where
    U: UserStore,
    S: SessionStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    session_store: &'a S,
    password_hasher: &'a H,
    tokens: &'a TokenService,
    policy: &'a AuthPolicy,
}

impl<'a, U, S, H> LoginUseCase<'a, U, S, H>
where
    U: UserStore,
    S: SessionStore,
    H: PasswordHasher,
{
    pub fn new(
        user_store: &'a U,
        session_store: &'a S,
        password_hasher: &'a H,
        tokens: &'a TokenService,
        policy: &'a AuthPolicy,
    ) -> Self {
        Self {
            user_store,
            session_store,
            password_hasher,
            tokens,
            policy,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        user_agent: Option<String>,
    ) -> Result<AuthenticatedUser, LoginError> {
        let user = self.user_store.get_user_by_email(&email).await?;

        if !self
            .password_hasher
            .matches(&password, user.password_hash())
            .await?
        {
            return Err(LoginError::InvalidCredentials);
        }

        // sessions are per-login, never reused
        let session = Session::new(user.id(), user_agent, self.policy.session_ttl);
        self.session_store.add_session(session.clone()).await?;

        let access_token = self.tokens.sign_access_token(user.id(), session.id)?;
        let refresh_token = self.tokens.sign_refresh_token(session.id)?;

        Ok(AuthenticatedUser {
            user: user.to_view(),
            access_token,
            refresh_token,
        })
    }
}
