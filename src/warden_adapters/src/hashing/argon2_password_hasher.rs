use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};

use warden_core::{Password, PasswordHashError, PasswordHasher};

/// Argon2id-backed implementation of the password hashing port. Hashing is
/// CPU-bound, so both operations run on the blocking thread pool.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    fn argon2() -> Result<Argon2<'static>, PasswordHashError> {
        let params = Params::new(15000, 2, 1, None)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<Secret<String>, PasswordHashError> {
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let salt = SaltString::generate(rand_core::OsRng);
                Self::argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|hash| Secret::from(hash.to_string()))
                    .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn matches(
        &self,
        candidate: &Password,
        password_hash: &Secret<String>,
    ) -> Result<bool, PasswordHashError> {
        let current_span = tracing::Span::current();
        let candidate = candidate.clone();
        let password_hash = password_hash.clone();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = PasswordHash::new(password_hash.expose_secret())
                    .map_err(|e| PasswordHashError::MalformedHash(e.to_string()))?;

                match Self::argon2()?
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
                {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHashError::MalformedHash(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
    }
}
