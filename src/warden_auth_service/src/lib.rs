pub mod auth_service;
pub mod helpers;
pub mod tracing;

pub use auth_service::AuthService;
pub use helpers::{
    auth_policy_from_settings, configure_postgresql, get_postgres_pool,
    token_service_from_settings,
};
