use warden_core::{
    Email, EmailClient, Password, PasswordHashError, PasswordHasher, Session, SessionStore,
    SessionStoreError, User, UserStore, UserStoreError, VerificationCode, VerificationCodeKind,
    VerificationCodeStore, VerificationCodeStoreError,
};

use crate::email_content;
use crate::policy::AuthPolicy;
use crate::tokens::{TokenError, TokenService};
use crate::use_cases::AuthenticatedUser;

/// Error types for the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Email already in use")]
    EmailAlreadyInUse,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Verification code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
    #[error("Session store error: {0}")]
    SessionStoreError(#[from] SessionStoreError),
    #[error("{0}")]
    PasswordHashError(#[from] PasswordHashError),
    #[error("{0}")]
    TokenError(#[from] TokenError),
}

impl From<UserStoreError> for RegisterError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => RegisterError::EmailAlreadyInUse,
            other => RegisterError::UserStoreError(other),
        }
    }
}

/// Register use case - creates the account, kicks off email verification
/// and establishes the first session.
pub struct RegisterUseCase<'a, U, V, S, H, E>
where
    U: UserStore,
    V: VerificationCodeStore,
    S: SessionStore,
    H: PasswordHasher,
    E: EmailClient,
{
    user_store: &'a U,
    code_store: &'a V,
    session_store: &'a S,
    password_hasher: &'a H,
    email_client: &'a E,
    tokens: &'a TokenService,
    policy: &'a AuthPolicy,
}

impl<'a, U, V, S, H, E> RegisterUseCase<'a, U, V, S, H, E>
where
    U: UserStore,
    V: VerificationCodeStore,
    S: SessionStore,
    H: PasswordHasher,
    E: EmailClient,
{
    pub fn new(
        user_store: &'a U,
        code_store: &'a V,
        session_store: &'a S,
        password_hasher: &'a H,
        email_client: &'a E,
        tokens: &'a TokenService,
        policy: &'a AuthPolicy,
    ) -> Self {
        Self {
            user_store,
            code_store,
            session_store,
            password_hasher,
            email_client,
            tokens,
            policy,
        }
    }

    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        user_agent: Option<String>,
    ) -> Result<AuthenticatedUser, RegisterError> {
        let password_hash = self.password_hasher.hash(password).await?;

        // uniqueness is enforced by the store's create
        let user = User::new(email, password_hash);
        self.user_store.add_user(user.clone()).await?;

        let code = VerificationCode::new(
            user.id(),
            VerificationCodeKind::EmailVerification,
            self.policy.email_verification_code_ttl,
        );
        self.code_store.add_code(code.clone()).await?;

        // delivery failure must never roll back the account
        let url = format!("{}/email/verify/{}", self.policy.client_url, code.id);
        let message = email_content::verify_email_message(&url);
        if let Err(error) = self
            .email_client
            .send_email(user.email(), message.subject, &message.html)
            .await
        {
            tracing::warn!(%error, "failed to send verification email");
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::*;

    struct Harness {
        user_store: FakeUserStore,
        code_store: FakeVerificationCodeStore,
        session_store: FakeSessionStore,
        hasher: FakePasswordHasher,
        email_client: FakeEmailClient,
        tokens: TokenService,
        policy: AuthPolicy,
    }

    impl Harness {
        fn new(email_client: FakeEmailClient) -> Self {
            Self {
                user_store: FakeUserStore::default(),
                code_store: FakeVerificationCodeStore::default(),
                session_store: FakeSessionStore::default(),
                hasher: FakePasswordHasher,
                email_client,
                tokens: test_token_service(),
                policy: test_policy(),
            }
        }

        fn use_case(
            &self,
        ) -> RegisterUseCase<
            '_,
            FakeUserStore,
            FakeVerificationCodeStore,
            FakeSessionStore,
            FakePasswordHasher,
            FakeEmailClient,
        > {
            RegisterUseCase::new(
                &self.user_store,
                &self.code_store,
                &self.session_store,
                &self.hasher,
                &self.email_client,
                &self.tokens,
                &self.policy,
            )
        }
    }

    #[tokio::test]
    async fn test_register_creates_user_session_and_tokens() {
        let harness = Harness::new(FakeEmailClient::default());

        let result = harness
            .use_case()
            .execute(
                test_email("test@example.com"),
                test_password("password123"),
                Some("integration-test agent".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(result.user.email, "test@example.com");
        assert!(!result.user.verified);

        // tokens are bound to the created session
        let claims = harness
            .tokens
            .verify_refresh_token(&result.refresh_token)
            .unwrap();
        let session = harness.session_store.get(claims.session_id).await.unwrap();
        assert_eq!(session.user_id, result.user.id);
        assert_eq!(session.user_agent.as_deref(), Some("integration-test agent"));

        // verification email carries the stored code id
        let sent = harness.email_client.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "test@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_conflict() {
        let harness = Harness::new(FakeEmailClient::default());
        let use_case = harness.use_case();

        use_case
            .execute(test_email("test@example.com"), test_password("password123"), None)
            .await
            .unwrap();

        let result = use_case
            .execute(test_email("test@example.com"), test_password("password456"), None)
            .await;

        assert!(matches!(result, Err(RegisterError::EmailAlreadyInUse)));
    }

    #[tokio::test]
    async fn test_email_failure_does_not_roll_back_registration() {
        let harness = Harness::new(FakeEmailClient::failing());

        let result = harness
            .use_case()
            .execute(test_email("test@example.com"), test_password("password123"), None)
            .await
            .unwrap();

        // account and session both exist despite the failed delivery
        assert!(harness.user_store.get(result.user.id).await.is_some());
        assert_eq!(harness.session_store.count_for_user(result.user.id).await, 1);
    }
}
