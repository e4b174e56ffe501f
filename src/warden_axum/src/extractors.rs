use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use warden_application::TokenService;
use warden_core::{SessionId, UserId};

use crate::cookies::ACCESS_TOKEN_COOKIE;
use crate::error::AuthApiError;

/// Identity proven by the access-token cookie. Add this extractor to any
/// handler that must only run for authenticated requests; rejections carry
/// the "Token expired" / "Invalid token" distinction for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub session_id: SessionId,
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: AsRef<TokenService> + Send + Sync,
{
    type Rejection = AuthApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .ok_or(AuthApiError::MissingToken)?;

        let claims = state.as_ref().verify_access_token(&token)?;

        Ok(AuthSession {
            user_id: claims.user_id,
            session_id: claims.session_id,
        })
    }
}
