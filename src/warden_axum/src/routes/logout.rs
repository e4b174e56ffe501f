use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde_json::json;
use warden_application::LogoutUseCase;
use warden_core::{EmailClient, PasswordHasher, SessionStore, UserStore, VerificationCodeStore};

use crate::cookies;
use crate::error::AuthApiError;
use crate::state::AuthState;

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<U, S, V, H, E>(
    State(state): State<AuthState<U, S, V, H, E>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationCodeStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let access_token = jar
        .get(cookies::ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned());

    if let Some(access_token) = access_token {
        let use_case = LogoutUseCase::new(&state.session_store, &state.tokens);
        use_case.execute(&access_token).await?;
    }

    // cookies are cleared even when no usable token came in
    let jar = jar
        .add(cookies::access_token_removal_cookie())
        .add(cookies::refresh_token_removal_cookie());

    Ok((
        StatusCode::OK,
        jar,
        Json(json!({ "message": "Logout successful" })),
    ))
}
