use chrono::Duration;
use warden_core::RateLimitPolicy;

/// Immutable lifetime and abuse-prevention parameters for the auth flows.
/// Built once at startup and passed into the use-case constructors; nothing
/// here is read from ambient state.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    pub session_ttl: Duration,
    pub session_rotation_threshold: Duration,
    pub email_verification_code_ttl: Duration,
    pub password_reset_code_ttl: Duration,
    pub password_reset_rate_limit: RateLimitPolicy,
    /// Base URL for links embedded in verification and reset emails.
    pub client_url: String,
}

impl AuthPolicy {
    pub fn with_client_url(client_url: impl Into<String>) -> Self {
        Self {
            session_ttl: Duration::days(30),
            session_rotation_threshold: Duration::hours(24),
            email_verification_code_ttl: Duration::days(365),
            password_reset_code_ttl: Duration::hours(1),
            password_reset_rate_limit: RateLimitPolicy::new(Duration::minutes(5), 2),
            client_url: client_url.into(),
        }
    }
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::with_client_url("http://localhost:3000")
    }
}
