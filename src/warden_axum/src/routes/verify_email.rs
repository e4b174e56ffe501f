use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use warden_application::VerifyEmailUseCase;
use warden_core::{
    EmailClient, PasswordHasher, SessionStore, UserStore, VerificationCodeId,
    VerificationCodeStore,
};

use crate::error::AuthApiError;
use crate::state::AuthState;

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<U, S, V, H, E>(
    State(state): State<AuthState<U, S, V, H, E>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    S: SessionStore + Clone + 'static,
    V: VerificationCodeStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    // a code that is not even a valid id cannot name a stored code
    let code_id = VerificationCodeId::parse(&code)
        .map_err(|_| AuthApiError::InvalidVerificationCode)?;

    let use_case = VerifyEmailUseCase::new(&state.code_store, &state.user_store);
    use_case.execute(code_id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Email was successfully verified" })),
    ))
}
