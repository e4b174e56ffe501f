//! Axum boundary for the warden authentication library.
//!
//! The handlers here do transport work only: deserialize request shapes,
//! parse domain types, run the matching use case from
//! `warden_application`, and encode the outcome as status codes, cookies
//! and JSON. All auth semantics live below this crate.

pub mod cookies;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

// Re-export for convenience
pub use error::{AuthApiError, ErrorResponse};
pub use extractors::AuthSession;
pub use state::AuthState;
