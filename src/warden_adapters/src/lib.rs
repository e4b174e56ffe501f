pub mod config;
pub mod email;
pub mod hashing;
pub mod persistence;

pub use email::{MockEmailClient, PostmarkEmailClient};
pub use hashing::Argon2PasswordHasher;
pub use persistence::{
    HashMapSessionStore, HashMapUserStore, HashMapVerificationCodeStore, PostgresSessionStore,
    PostgresUserStore, PostgresVerificationCodeStore,
};
