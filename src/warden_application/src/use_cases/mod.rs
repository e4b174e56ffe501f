pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod request_password_reset;
pub mod reset_password;
pub mod verify_email;

#[cfg(test)]
pub(crate) mod test_support;

use warden_core::UserView;

/// Result of the flows that establish a session: the user (password
/// omitted) plus the freshly minted token pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user: UserView,
    pub access_token: String,
    pub refresh_token: String,
}
