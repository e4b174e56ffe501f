pub mod domain;
pub mod ports;
pub mod rate_limit;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    password::Password,
    session::{Session, SessionId},
    user::{User, UserError, UserId, UserView},
    verification_code::{
        UnknownCodeKind, VerificationCode, VerificationCodeId, VerificationCodeKind,
    },
};

pub use ports::{
    repositories::{
        SessionStore, SessionStoreError, UserStore, UserStoreError, VerificationCodeStore,
        VerificationCodeStoreError,
    },
    services::{EmailClient, PasswordHashError, PasswordHasher},
};

pub use rate_limit::RateLimitPolicy;
