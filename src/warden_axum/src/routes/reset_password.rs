use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;
use warden_application::ResetPasswordUseCase;
use warden_core::{
    EmailClient, Password, PasswordHasher, SessionStore, UserStore, VerificationCodeId,
    VerificationCodeStore,
};

use crate::cookies;
use crate::error::AuthApiError;
use crate::state::AuthState;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: Secret<String>,
    #[serde(rename = "verificationCode")]
    pub verification_code: String,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<U, S, V, H, E>(
    State(state): State<AuthState<U, S, V, H, E>>,
    jar: CookieJar,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationCodeStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let password = Password::try_from(request.password)?;
    let code_id = VerificationCodeId::parse(&request.verification_code)
        .map_err(|_| AuthApiError::InvalidVerificationCode)?;

    let use_case = ResetPasswordUseCase::new(
        &state.code_store,
        &state.user_store,
        &state.session_store,
        &state.password_hasher,
    );
    use_case.execute(password, code_id).await?;

    // the reset wiped every session, so any cookies this client holds are dead
    let jar = jar
        .add(cookies::access_token_removal_cookie())
        .add(cookies::refresh_token_removal_cookie());

    Ok((
        StatusCode::OK,
        jar,
        Json(json!({ "message": "Password reset successful" })),
    ))
}
