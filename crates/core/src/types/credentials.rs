//! Sign-up credential validation.

use crate::types::email::{Email, EmailError};

/// Minimum password length accepted by the hosted identity provider.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors that can occur when validating [`SignupCredentials`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CredentialsError {
    /// One or more of the three fields is empty.
    #[error("all credential fields are required")]
    MissingFields,
    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
    /// Password is shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The email address is structurally invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Validated account credentials collected by step 1 of the wizard.
///
/// Construction enforces the invariants: all fields present, password equal
/// to its confirmation, and password at least [`MIN_PASSWORD_LENGTH`]
/// characters. The confirmation is consumed by validation and not retained.
/// Deliberately not serializable - a value of this type only exists on the
/// way into a sign-up call.
#[derive(Debug, Clone)]
pub struct SignupCredentials {
    email: Email,
    password: String,
}

impl SignupCredentials {
    /// Validate raw form input into credentials.
    ///
    /// Field-presence is checked before any other rule so a blank form gets
    /// the generic "fill in all fields" treatment rather than a mismatch
    /// complaint.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError`] if any field is empty, the passwords do
    /// not match, the password is too short, or the email is malformed.
    pub fn new(
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<Self, CredentialsError> {
        if email.is_empty() || password.is_empty() || password_confirmation.is_empty() {
            return Err(CredentialsError::MissingFields);
        }

        if password != password_confirmation {
            return Err(CredentialsError::PasswordMismatch);
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(CredentialsError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        let email = Email::parse(email)?;

        Ok(Self {
            email,
            password: password.to_owned(),
        })
    }

    /// The validated email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// The validated password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let creds = SignupCredentials::new("a@b.com", "secret1", "secret1").unwrap();
        assert_eq!(creds.email().as_str(), "a@b.com");
        assert_eq!(creds.password(), "secret1");
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            SignupCredentials::new("", "secret1", "secret1"),
            Err(CredentialsError::MissingFields)
        ));
        assert!(matches!(
            SignupCredentials::new("a@b.com", "", "secret1"),
            Err(CredentialsError::MissingFields)
        ));
        assert!(matches!(
            SignupCredentials::new("a@b.com", "secret1", ""),
            Err(CredentialsError::MissingFields)
        ));
    }

    #[test]
    fn test_password_mismatch() {
        assert!(matches!(
            SignupCredentials::new("a@b.com", "secret1", "secret2"),
            Err(CredentialsError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_password_too_short() {
        assert!(matches!(
            SignupCredentials::new("a@b.com", "short", "short"),
            Err(CredentialsError::PasswordTooShort { min: 6 })
        ));
    }

    #[test]
    fn test_exactly_minimum_length() {
        assert!(SignupCredentials::new("a@b.com", "sixsix", "sixsix").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(matches!(
            SignupCredentials::new("not-an-email", "secret1", "secret1"),
            Err(CredentialsError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_mismatch_reported_before_length() {
        // A short password that also mismatches reports the mismatch,
        // matching the order the registration form checks them in.
        assert!(matches!(
            SignupCredentials::new("a@b.com", "abc", "abd"),
            Err(CredentialsError::PasswordMismatch)
        ));
    }
}
