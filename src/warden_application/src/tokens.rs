use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use warden_core::{SessionId, UserId};

pub const TOKEN_AUDIENCE: &str = "user";

#[derive(Clone)]
pub struct TokenConfig {
    pub secret: Secret<String>,
    pub ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: Secret<String>, ttl: Duration) -> Self {
        Self { secret, ttl }
    }
}

/// Stateless signer/verifier for the two token kinds. Access and refresh
/// tokens use distinct secrets, so neither can ever be verified as the
/// other.
#[derive(Clone)]
pub struct TokenService {
    access: TokenConfig,
    refresh: TokenConfig,
}

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Unexpected token error: {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    pub aud: String,
    pub iat: usize,
    pub exp: usize,
}

/// Refresh tokens carry only the session id. The user is re-derived from
/// the session record at refresh time, so deleting the session revokes the
/// token immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    pub aud: String,
    pub iat: usize,
    pub exp: usize,
}

impl TokenService {
    pub fn new(access: TokenConfig, refresh: TokenConfig) -> Self {
        Self { access, refresh }
    }

    pub fn sign_access_token(
        &self,
        user_id: UserId,
        session_id: SessionId,
    ) -> Result<String, TokenError> {
        let (iat, exp) = timestamps(self.access.ttl)?;
        let claims = AccessTokenClaims {
            user_id,
            session_id,
            aud: TOKEN_AUDIENCE.to_string(),
            iat,
            exp,
        };
        sign(&claims, &self.access.secret)
    }

    pub fn sign_refresh_token(&self, session_id: SessionId) -> Result<String, TokenError> {
        let (iat, exp) = timestamps(self.refresh.ttl)?;
        let claims = RefreshTokenClaims {
            session_id,
            aud: TOKEN_AUDIENCE.to_string(),
            iat,
            exp,
        };
        sign(&claims, &self.refresh.secret)
    }

    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        verify(token, &self.access.secret, true)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshTokenClaims, TokenError> {
        verify(token, &self.refresh.secret, true)
    }

    /// Best-effort decode for logout: the signature must check out but the
    /// expiry is ignored, since an expired access token still identifies
    /// the session to delete.
    pub fn peek_access_token(&self, token: &str) -> Option<AccessTokenClaims> {
        verify(token, &self.access.secret, false).ok()
    }
}

fn timestamps(ttl: Duration) -> Result<(usize, usize), TokenError> {
    let now = Utc::now();
    let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
        TokenError::UnexpectedError("Token lifetime out of range".to_string())
    })?;

    let iat = now
        .timestamp()
        .try_into()
        .map_err(|_| TokenError::UnexpectedError("Issue time before epoch".to_string()))?;
    let exp = expires_at
        .timestamp()
        .try_into()
        .map_err(|_| TokenError::UnexpectedError("Expiry before epoch".to_string()))?;

    Ok((iat, exp))
}

fn sign<T: Serialize>(claims: &T, secret: &Secret<String>) -> Result<String, TokenError> {
    encode(
        &jsonwebtoken::Header::default(),
        claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| TokenError::UnexpectedError(e.to_string()))
}

fn verify<T: DeserializeOwned>(
    token: &str,
    secret: &Secret<String>,
    validate_exp: bool,
) -> Result<T, TokenError> {
    let mut validation = Validation::default();
    validation.set_audience(&[TOKEN_AUDIENCE]);
    validation.validate_exp = validate_exp;

    decode::<T>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}
