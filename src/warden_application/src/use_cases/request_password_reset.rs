use chrono::Utc;
use warden_core::{
    Email, EmailClient, UserStore, UserStoreError, VerificationCode, VerificationCodeKind,
    VerificationCodeStore, VerificationCodeStoreError,
};

use crate::email_content;
use crate::policy::AuthPolicy;

/// Error types for the request password reset use case
#[derive(Debug, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("User doesn't exist")]
    UserNotFound,
    #[error("Too many requests, please try again later")]
    TooManyRequests,
    /// The reset contract is "email sent", so a failed delivery surfaces
    /// as an internal error, unlike registration.
    #[error("Failed to send password reset email: {0}")]
    EmailError(String),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Verification code store error: {0}")]
    CodeStoreError(#[from] VerificationCodeStoreError),
}

impl From<UserStoreError> for RequestPasswordResetError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => RequestPasswordResetError::UserNotFound,
            other => RequestPasswordResetError::UserStoreError(other),
        }
    }
}

/// Request password reset use case - issues a short-lived reset code and
/// mails its link, rate limited per account.
pub struct RequestPasswordResetUseCase<'a, U, V, E>
where
    U: UserStore,
    V: VerificationCodeStore,
    E: EmailClient,
{
    user_store: &'a U,
    code_store: &'a V,
    email_client: &'a E,
    policy: &'a AuthPolicy,
}

impl<'a, U, V, E> RequestPasswordResetUseCase<'a, U, V, E>
where
    U: UserStore,
    V: VerificationCodeStore,
    E: EmailClient,
{
    pub fn new(
        user_store: &'a U,
        code_store: &'a V,
        email_client: &'a E,
        policy: &'a AuthPolicy,
    ) -> Self {
        Self {
            user_store,
            code_store,
            email_client,
            policy,
        }
    }

    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), RequestPasswordResetError> {
        let user = self.user_store.get_user_by_email(&email).await?;

        // Count-then-create is not atomic; under concurrency the threshold
        // can be exceeded by a small margin, which is acceptable for abuse
        // mitigation.
        let limit = &self.policy.password_reset_rate_limit;
        let since = limit.window_start(Utc::now());
        let recent = self
            .code_store
            .count_codes_created_since(user.id(), VerificationCodeKind::PasswordReset, since)
            .await?;
        if !limit.allow(recent) {
            return Err(RequestPasswordResetError::TooManyRequests);
        }

        let code = VerificationCode::new(
            user.id(),
            VerificationCodeKind::PasswordReset,
            self.policy.password_reset_code_ttl,
        );
        self.code_store.add_code(code.clone()).await?;

        // the exp parameter is display-only for the client; the server
        // re-validates expiry independently
        let url = format!(
            "{}/password/reset?code={}&exp={}",
            self.policy.client_url,
            code.id,
            code.expires_at.timestamp_millis()
        );
        let message = email_content::password_reset_message(&url);
        self.email_client
            .send_email(user.email(), message.subject, &message.html)
            .await
            .map_err(RequestPasswordResetError::EmailError)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use warden_core::User;

    use super::*;
    use crate::use_cases::test_support::*;

    async fn store_with_user() -> (FakeUserStore, User) {
        let store = FakeUserStore::default();
        let user = User::new(
            test_email("test@example.com"),
            secrecy::Secret::from("fake-hash:password123".to_string()),
        );
        store.insert(user.clone()).await;
        (store, user)
    }

    #[tokio::test]
    async fn test_reset_request_creates_code_and_sends_link() {
        let (user_store, user) = store_with_user().await;
        let code_store = FakeVerificationCodeStore::default();
        let email_client = FakeEmailClient::default();
        let policy = test_policy();

        let use_case =
            RequestPasswordResetUseCase::new(&user_store, &code_store, &email_client, &policy);
        use_case.execute(test_email("test@example.com")).await.unwrap();

        let sent = email_client.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "test@example.com");

        // the emailed link embeds the stored code id
        let recent = code_store
            .count_codes_created_since(
                user.id(),
                VerificationCodeKind::PasswordReset,
                Utc::now() - chrono::Duration::minutes(1),
            )
            .await
            .unwrap();
        assert_eq!(recent, 1);
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let user_store = FakeUserStore::default();
        let code_store = FakeVerificationCodeStore::default();
        let email_client = FakeEmailClient::default();
        let policy = test_policy();

        let use_case =
            RequestPasswordResetUseCase::new(&user_store, &code_store, &email_client, &policy);
        let result = use_case.execute(test_email("nobody@example.com")).await;

        assert!(matches!(result, Err(RequestPasswordResetError::UserNotFound)));
        assert!(email_client.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_third_request_within_window_is_rate_limited() {
        let (user_store, _user) = store_with_user().await;
        let code_store = FakeVerificationCodeStore::default();
        let email_client = FakeEmailClient::default();
        let policy = test_policy();

        let use_case =
            RequestPasswordResetUseCase::new(&user_store, &code_store, &email_client, &policy);

        use_case.execute(test_email("test@example.com")).await.unwrap();
        use_case.execute(test_email("test@example.com")).await.unwrap();
        let third = use_case.execute(test_email("test@example.com")).await;

        assert!(matches!(third, Err(RequestPasswordResetError::TooManyRequests)));
        assert_eq!(email_client.sent().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_delivery_is_an_error() {
        let (user_store, _user) = store_with_user().await;
        let code_store = FakeVerificationCodeStore::default();
        let email_client = FakeEmailClient::failing();
        let policy = test_policy();

        let use_case =
            RequestPasswordResetUseCase::new(&user_store, &code_store, &email_client, &policy);
        let result = use_case.execute(test_email("test@example.com")).await;

        assert!(matches!(result, Err(RequestPasswordResetError::EmailError(_))));
    }
}
