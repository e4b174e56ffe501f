use chrono::Duration;
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use warden_adapters::config::AuthServiceSettings;
use warden_application::{AuthPolicy, TokenConfig, TokenService};
use warden_core::RateLimitPolicy;

/// Configure and return a PostgreSQL connection pool
///
/// This function loads the database URL from configuration, creates a
/// connection pool, and runs all pending migrations.
///
/// # Panics
/// Panics if unable to create the pool or run migrations
pub async fn configure_postgresql() -> PgPool {
    let settings = AuthServiceSettings::load();
    let db_url = settings.postgres.url.expose_secret();

    let pg_pool = get_postgres_pool(db_url)
        .await
        .expect("Failed to create Postgres connection pool");

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

/// Build the token service from loaded settings.
pub fn token_service_from_settings(settings: &AuthServiceSettings) -> TokenService {
    TokenService::new(
        TokenConfig::new(
            settings.auth.access_token_secret.clone(),
            Duration::seconds(settings.auth.access_token_ttl_seconds),
        ),
        TokenConfig::new(
            settings.auth.refresh_token_secret.clone(),
            Duration::seconds(settings.auth.refresh_token_ttl_seconds),
        ),
    )
}

/// Build the auth policy from loaded settings.
pub fn auth_policy_from_settings(settings: &AuthServiceSettings) -> AuthPolicy {
    AuthPolicy {
        session_ttl: Duration::seconds(settings.auth.session_ttl_seconds),
        session_rotation_threshold: Duration::seconds(
            settings.auth.session_rotation_threshold_seconds,
        ),
        email_verification_code_ttl: Duration::seconds(
            settings.auth.email_verification_code_ttl_seconds,
        ),
        password_reset_code_ttl: Duration::seconds(settings.auth.password_reset_code_ttl_seconds),
        password_reset_rate_limit: RateLimitPolicy::new(
            Duration::seconds(settings.auth.password_reset_window_seconds),
            settings.auth.password_reset_max_requests,
        ),
        client_url: settings.app.client_url.clone(),
    }
}
