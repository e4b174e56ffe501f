use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Plaintext password as received from a client. Only ever handed to the
/// password hasher; never stored or logged.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().chars().count() >= MIN_PASSWORD_LENGTH {
            Ok(Self(value))
        } else {
            Err(UserError::PasswordTooShort)
        }
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(value: &str) -> Result<Password, UserError> {
        Password::try_from(Secret::from(value.to_string()))
    }

    #[test]
    fn test_passwords_of_minimum_length_are_accepted() {
        assert!(password("12345678").is_ok());
        assert!(password("a-much-longer-password").is_ok());
    }

    #[test]
    fn test_short_passwords_are_rejected() {
        assert!(matches!(password(""), Err(UserError::PasswordTooShort)));
        assert!(matches!(password("1234567"), Err(UserError::PasswordTooShort)));
    }
}
