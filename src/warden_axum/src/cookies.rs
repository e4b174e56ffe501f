use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";
/// The refresh cookie is scoped to the refresh endpoint so the long-lived
/// token never rides along on any other request.
pub const REFRESH_TOKEN_PATH: &str = "/auth/refresh";

const ACCESS_TOKEN_MAX_AGE: Duration = Duration::minutes(15);
const REFRESH_TOKEN_MAX_AGE: Duration = Duration::days(30);

pub fn access_token_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(ACCESS_TOKEN_MAX_AGE)
        .build()
}

pub fn refresh_token_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, token))
        .path(REFRESH_TOKEN_PATH)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(REFRESH_TOKEN_MAX_AGE)
        .build()
}

pub fn access_token_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((ACCESS_TOKEN_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}

pub fn refresh_token_removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .path(REFRESH_TOKEN_PATH)
        .build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_cookie_attributes() {
        let cookie = access_token_cookie("token-value".to_string(), true);
        assert_eq!(cookie.name(), ACCESS_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(ACCESS_TOKEN_MAX_AGE));
    }

    #[test]
    fn test_refresh_token_cookie_is_path_restricted() {
        let cookie = refresh_token_cookie("token-value".to_string(), false);
        assert_eq!(cookie.name(), REFRESH_TOKEN_COOKIE);
        assert_eq!(cookie.path(), Some(REFRESH_TOKEN_PATH));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(REFRESH_TOKEN_MAX_AGE));
    }

    #[test]
    fn test_removal_cookies_match_paths() {
        let access = access_token_removal_cookie();
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.value(), "");

        let refresh = refresh_token_removal_cookie();
        assert_eq!(refresh.path(), Some(REFRESH_TOKEN_PATH));
        assert_eq!(refresh.max_age(), Some(Duration::ZERO));
    }
}
