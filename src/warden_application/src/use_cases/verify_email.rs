use warden_core::{
    UserStore, UserStoreError, UserView, VerificationCodeId, VerificationCodeKind,
    VerificationCodeStore, VerificationCodeStoreError,
};

/// Error types for the verify email use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("Invalid or expired verification code")]
    InvalidCode,
    /// The code pointed at a user that no longer exists - a data
    /// inconsistency, surfaced as an internal error at the boundary.
    #[error("Failed to verify email")]
    UserUpdateFailed,
    #[error("Verification code store error: {0}")]
    CodeStoreError(VerificationCodeStoreError),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

impl From<VerificationCodeStoreError> for VerifyEmailError {
    fn from(error: VerificationCodeStoreError) -> Self {
        match error {
            VerificationCodeStoreError::CodeNotFound => VerifyEmailError::InvalidCode,
            other => VerifyEmailError::CodeStoreError(other),
        }
    }
}

impl From<UserStoreError> for VerifyEmailError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => VerifyEmailError::UserUpdateFailed,
            other => VerifyEmailError::UserStoreError(other),
        }
    }
}

/// Verify email use case - consumes an email-verification code and flips
/// the owning user's verified flag.
pub struct VerifyEmailUseCase<'a, V, U>
where
    V: VerificationCodeStore,
    U: UserStore,
{
    code_store: &'a V,
    user_store: &'a U,
}

impl<'a, V, U> VerifyEmailUseCase<'a, V, U>
where
    V: VerificationCodeStore,
    U: UserStore,
{
    pub fn new(code_store: &'a V, user_store: &'a U) -> Self {
        Self {
            code_store,
            user_store,
        }
    }

    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip(self))]
    pub async fn execute(&self, code_id: VerificationCodeId) -> Result<UserView, VerifyEmailError> {
        let code = self
            .code_store
            .find_valid_code(code_id, VerificationCodeKind::EmailVerification)
            .await?;

        let user = self.user_store.mark_verified(code.user_id).await?;

        // single-use enforcement
        self.code_store.delete_code(code.id).await?;

        Ok(user.to_view())
    }
}
