use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use warden_application::RefreshUseCase;
use warden_core::{EmailClient, PasswordHasher, SessionStore, UserStore, VerificationCodeStore};

use crate::cookies;
use crate::error::AuthApiError;
use crate::state::AuthState;

#[tracing::instrument(name = "Refresh access token", skip_all)]
pub async fn refresh<U, S, V, H, E>(
    State(state): State<AuthState<U, S, V, H, E>>,
    jar: CookieJar,
) -> Response
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationCodeStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Some(refresh_token) = jar
        .get(cookies::REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
    else {
        return failure(jar, AuthApiError::MissingToken);
    };

    let use_case = RefreshUseCase::new(&state.session_store, &state.tokens, &state.policy);

    match use_case.execute(&refresh_token).await {
        Ok(tokens) => {
            let mut jar = jar.add(cookies::access_token_cookie(
                tokens.access_token,
                state.secure_cookies,
            ));
            // only rotate the cookie when a new refresh token was minted;
            // otherwise the caller keeps the one it sent
            if let Some(new_refresh_token) = tokens.new_refresh_token {
                jar = jar.add(cookies::refresh_token_cookie(
                    new_refresh_token,
                    state.secure_cookies,
                ));
            }
            (
                StatusCode::OK,
                jar,
                Json(json!({ "message": "Access token refreshed" })),
            )
                .into_response()
        }
        Err(error) => failure(jar, error.into()),
    }
}

/// A failed refresh clears both auth cookies so clients fall back to a
/// full login instead of retrying a dead token.
fn failure(jar: CookieJar, error: AuthApiError) -> Response {
    let jar = jar
        .add(cookies::access_token_removal_cookie())
        .add(cookies::refresh_token_removal_cookie());
    (jar, error).into_response()
}
