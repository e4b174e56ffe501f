pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod reset_password;
pub mod verify_email;

pub use forgot_password::forgot_password;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use register::register;
pub use reset_password::reset_password;
pub use verify_email::verify_email;

use axum::http::{HeaderMap, header::USER_AGENT};

pub(crate) fn user_agent_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
