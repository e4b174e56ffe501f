use warden_core::{
    Password, PasswordHashError, PasswordHasher, SessionStore, SessionStoreError, UserStore,
    UserStoreError, UserView, VerificationCodeId, VerificationCodeKind, VerificationCodeStore,
    VerificationCodeStoreError,
};

/// Error types for the reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Invalid or expired verification code")]
    InvalidCode,
    #[error("Failed to reset password")]
    UserUpdateFailed,
    #[error("{0}")]
    PasswordHashError(#[from] PasswordHashError),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Verification code store error: {0}")]
    CodeStoreError(VerificationCodeStoreError),
    #[error("Session store error: {0}")]
    SessionStoreError(#[from] SessionStoreError),
}

impl From<VerificationCodeStoreError> for ResetPasswordError {
    fn from(error: VerificationCodeStoreError) -> Self {
        match error {
            VerificationCodeStoreError::CodeNotFound => ResetPasswordError::InvalidCode,
            other => ResetPasswordError::CodeStoreError(other),
        }
    }
}

impl From<UserStoreError> for ResetPasswordError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => ResetPasswordError::UserUpdateFailed,
            other => ResetPasswordError::UserStoreError(other),
        }
    }
}

/// Reset password use case - consumes a reset code, replaces the password
/// hash and force-logs-out every session of the account.
pub struct ResetPasswordUseCase<'a, V, U, S, H>
where
    V: VerificationCodeStore,
    U: UserStore,
    S: SessionStore,
    H: PasswordHasher,
{
    code_store: &'a V,
    user_store: &'a U,
    session_store: &'a S,
    password_hasher: &'a H,
}

impl<'a, V, U, S, H> ResetPasswordUseCase<'a, V, U, S, H>
where
    V: VerificationCodeStore,
    U: UserStore,
    S: SessionStore,
    H: PasswordHasher,
{
    pub fn new(
        code_store: &'a V,
        user_store: &'a U,
        session_store: &'a S,
        password_hasher: &'a H,
    ) -> Self {
        Self {
            code_store,
            user_store,
            session_store,
            password_hasher,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        password: Password,
        code_id: VerificationCodeId,
    ) -> Result<UserView, ResetPasswordError> {
        let code = self
            .code_store
            .find_valid_code(code_id, VerificationCodeKind::PasswordReset)
            .await?;

        let password_hash = self.password_hasher.hash(password).await?;
        let user = self
            .user_store
            .set_password_hash(code.user_id, password_hash)
            .await?;

        self.code_store.delete_code(code.id).await?;

        // every outstanding refresh token dies with its session record
        self.session_store
            .delete_sessions_for_user(user.id())
            .await?;

        Ok(user.to_view())
    }
}
