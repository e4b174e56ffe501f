use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;
use warden_application::RequestPasswordResetUseCase;
use warden_core::{
    Email, EmailClient, PasswordHasher, SessionStore, UserStore, VerificationCodeStore,
};

use crate::error::AuthApiError;
use crate::state::AuthState;

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Request password reset", skip_all)]
pub async fn forgot_password<U, S, V, H, E>(
    State(state): State<AuthState<U, S, V, H, E>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationCodeStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = RequestPasswordResetUseCase::new(
        &state.user_store,
        &state.code_store,
        &state.email_client,
        &state.policy,
    );
    use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Password reset email sent" })),
    ))
}
