use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::user::UserId;

/// Opaque identifier embedded in emailed verification links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationCodeId(Uuid);

impl VerificationCodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value).map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for VerificationCodeId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for VerificationCodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown verification code kind: {0}")]
pub struct UnknownCodeKind(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationCodeKind {
    EmailVerification,
    PasswordReset,
}

impl VerificationCodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailVerification => "email_verification",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl std::str::FromStr for VerificationCodeKind {
    type Err = UnknownCodeKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "email_verification" => Ok(Self::EmailVerification),
            "password_reset" => Ok(Self::PasswordReset),
            other => Err(UnknownCodeKind(other.to_string())),
        }
    }
}

/// Single-use, typed, expiring code delivered out of band (via email).
/// Consumed codes are deleted; expired codes simply fail the valid-use
/// lookup and stay inert.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationCode {
    pub id: VerificationCodeId,
    pub user_id: UserId,
    pub kind: VerificationCodeKind,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    pub fn new(user_id: UserId, kind: VerificationCodeKind, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: VerificationCodeId::new(),
            user_id,
            kind,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
