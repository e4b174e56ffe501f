use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use warden_application::{
    LoginError, LogoutError, RefreshError, RegisterError, RequestPasswordResetError,
    ResetPasswordError, TokenError, VerifyEmailError,
};
use warden_core::UserError;

/// Wire shape of every error this API returns: a human message plus a
/// stable machine-readable code.
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authorized")]
    MissingToken,

    /// Message distinguishes "Token expired" from "Invalid token" for
    /// client display; both deny access identically.
    #[error("{0}")]
    InvalidAccessToken(String),

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid or expired verification code")]
    InvalidVerificationCode,

    #[error("User doesn't exist")]
    UserNotFound,

    #[error("Too many requests, please try again later")]
    TooManyRequests,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The detail is logged, never returned to the caller.
    #[error("Something went wrong")]
    UnexpectedError(String),
}

impl AuthApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthApiError::EmailAlreadyInUse => (StatusCode::CONFLICT, "email_in_use"),
            AuthApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AuthApiError::MissingToken => (StatusCode::UNAUTHORIZED, "missing_token"),
            AuthApiError::InvalidAccessToken(_) => {
                (StatusCode::UNAUTHORIZED, "invalid_access_token")
            }
            AuthApiError::InvalidRefreshToken => {
                (StatusCode::UNAUTHORIZED, "invalid_refresh_token")
            }
            AuthApiError::SessionExpired => (StatusCode::UNAUTHORIZED, "session_expired"),
            AuthApiError::InvalidVerificationCode => {
                (StatusCode::NOT_FOUND, "invalid_verification_code")
            }
            AuthApiError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            AuthApiError::TooManyRequests => (StatusCode::TOO_MANY_REQUESTS, "too_many_requests"),
            AuthApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            AuthApiError::UnexpectedError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        if let AuthApiError::UnexpectedError(detail) = &self {
            tracing::error!(%detail, "request failed with an internal error");
        }

        let (status_code, code) = self.status_and_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for AuthApiError {
    fn from(error: UserError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<TokenError> for AuthApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Expired => AuthApiError::InvalidAccessToken("Token expired".to_string()),
            TokenError::Invalid => AuthApiError::InvalidAccessToken("Invalid token".to_string()),
            TokenError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::EmailAlreadyInUse => AuthApiError::EmailAlreadyInUse,
            other => AuthApiError::UnexpectedError(other.to_string()),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => AuthApiError::InvalidCredentials,
            other => AuthApiError::UnexpectedError(other.to_string()),
        }
    }
}

impl From<RefreshError> for AuthApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::InvalidRefreshToken => AuthApiError::InvalidRefreshToken,
            RefreshError::SessionExpired => AuthApiError::SessionExpired,
            other => AuthApiError::UnexpectedError(other.to_string()),
        }
    }
}

impl From<LogoutError> for AuthApiError {
    fn from(error: LogoutError) -> Self {
        AuthApiError::UnexpectedError(error.to_string())
    }
}

impl From<VerifyEmailError> for AuthApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::InvalidCode => AuthApiError::InvalidVerificationCode,
            other => AuthApiError::UnexpectedError(other.to_string()),
        }
    }
}

impl From<RequestPasswordResetError> for AuthApiError {
    fn from(error: RequestPasswordResetError) -> Self {
        match error {
            RequestPasswordResetError::UserNotFound => AuthApiError::UserNotFound,
            RequestPasswordResetError::TooManyRequests => AuthApiError::TooManyRequests,
            other => AuthApiError::UnexpectedError(other.to_string()),
        }
    }
}

impl From<ResetPasswordError> for AuthApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidCode => AuthApiError::InvalidVerificationCode,
            other => AuthApiError::UnexpectedError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AuthApiError::EmailAlreadyInUse, StatusCode::CONFLICT),
            (AuthApiError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthApiError::SessionExpired, StatusCode::UNAUTHORIZED),
            (
                AuthApiError::InvalidVerificationCode,
                StatusCode::NOT_FOUND,
            ),
            (AuthApiError::UserNotFound, StatusCode::NOT_FOUND),
            (
                AuthApiError::TooManyRequests,
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                AuthApiError::InvalidInput("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AuthApiError::UnexpectedError("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_and_code().0, expected);
        }
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let error = AuthApiError::UnexpectedError("connection refused to db-host:5432".to_string());
        assert_eq!(error.to_string(), "Something went wrong");
    }

    #[test]
    fn test_expired_and_invalid_access_tokens_read_differently() {
        let expired = AuthApiError::from(TokenError::Expired);
        let invalid = AuthApiError::from(TokenError::Invalid);
        assert_eq!(expired.to_string(), "Token expired");
        assert_eq!(invalid.to_string(), "Invalid token");
        // same machine code and status either way
        assert_eq!(expired.status_and_code(), invalid.status_and_code());
    }
}
