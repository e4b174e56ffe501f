use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;
use warden_application::RegisterUseCase;
use warden_core::{
    Email, EmailClient, Password, PasswordHasher, SessionStore, UserStore, VerificationCodeStore,
};

use crate::cookies;
use crate::error::AuthApiError;
use crate::routes::user_agent_from;
use crate::state::AuthState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, S, V, H, E>(
    State(state): State<AuthState<U, S, V, H, E>>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationCodeStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;
    let user_agent = user_agent_from(&headers);

    let use_case = RegisterUseCase::new(
        &state.user_store,
        &state.code_store,
        &state.session_store,
        &state.password_hasher,
        &state.email_client,
        &state.tokens,
        &state.policy,
    );
    let authenticated = use_case.execute(email, password, user_agent).await?;

    let jar = jar
        .add(cookies::access_token_cookie(
            authenticated.access_token,
            state.secure_cookies,
        ))
        .add(cookies::refresh_token_cookie(
            authenticated.refresh_token,
            state.secure_cookies,
        ));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({ "user": authenticated.user })),
    ))
}
