use std::sync::Arc;

use warden_application::{AuthPolicy, TokenService};

/// Shared state for the auth routes: the stores and outbound services the
/// use cases run against, plus the token service and policy values fixed
/// at startup.
#[derive(Clone)]
pub struct AuthState<U, S, V, H, E> {
    pub user_store: U,
    pub session_store: S,
    pub code_store: V,
    pub password_hasher: H,
    pub email_client: E,
    pub tokens: Arc<TokenService>,
    pub policy: Arc<AuthPolicy>,
    /// Mirrors the deployment environment: cookies are Secure everywhere
    /// except local development.
    pub secure_cookies: bool,
}

impl<U, S, V, H, E> AuthState<U, S, V, H, E> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_store: U,
        session_store: S,
        code_store: V,
        password_hasher: H,
        email_client: E,
        tokens: TokenService,
        policy: AuthPolicy,
        secure_cookies: bool,
    ) -> Self {
        Self {
            user_store,
            session_store,
            code_store,
            password_hasher,
            email_client,
            tokens: Arc::new(tokens),
            policy: Arc::new(policy),
            secure_cookies,
        }
    }
}

impl<U, S, V, H, E> AsRef<TokenService> for AuthState<U, S, V, H, E> {
    fn as_ref(&self) -> &TokenService {
        &self.tokens
    }
}
