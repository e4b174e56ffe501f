use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use warden_adapters::config::AllowedOrigins;
use warden_application::{AuthPolicy, TokenService};
use warden_axum::{
    AuthState,
    routes::{forgot_password, login, logout, refresh, register, reset_password, verify_email},
};
use warden_core::{EmailClient, PasswordHasher, SessionStore, UserStore, VerificationCodeStore};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main authentication service that provides all auth-related routes
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService with the provided stores and services
    ///
    /// # Arguments
    /// * `user_store` - Credential store (must be Clone)
    /// * `session_store` - Session store (must be Clone)
    /// * `code_store` - Verification code registry (must be Clone)
    /// * `password_hasher` - One-way password hashing capability
    /// * `email_client` - Client for sending emails
    /// * `tokens` - Token service built from process configuration
    /// * `policy` - Expiry and rate-limit parameters
    /// * `secure_cookies` - Secure flag for auth cookies (off in development)
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal Arc sharing (or a connection
    /// pool); one state value is shared across all routes.
    #[allow(clippy::too_many_arguments)]
    pub fn new<U, S, V, H, E>(
        user_store: U,
        session_store: S,
        code_store: V,
        password_hasher: H,
        email_client: E,
        tokens: TokenService,
        policy: AuthPolicy,
        secure_cookies: bool,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        S: SessionStore + Clone + 'static,
        V: VerificationCodeStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let state = AuthState::new(
            user_store,
            session_store,
            code_store,
            password_hasher,
            email_client,
            tokens,
            policy,
            secure_cookies,
        );

        let router = Router::new()
            .route("/register", post(register::<U, S, V, H, E>))
            .route("/login", post(login::<U, S, V, H, E>))
            .route("/refresh", get(refresh::<U, S, V, H, E>))
            .route("/logout", get(logout::<U, S, V, H, E>))
            .route("/email/verify/{code}", get(verify_email::<U, S, V, H, E>))
            .route("/password/forgot", post(forgot_password::<U, S, V, H, E>))
            .route("/password/reset", post(reset_password::<U, S, V, H, E>))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a nested router that can be mounted on
    /// another router (conventionally under `/auth`, which is what the
    /// refresh cookie path assumes).
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        origin
                            .to_str()
                            .map(|origin| allowed_origins.contains(origin))
                            .unwrap_or(false)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = Router::new().nest("/auth", self.as_nested_router(allowed_origins));

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
