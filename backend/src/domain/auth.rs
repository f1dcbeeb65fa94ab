//! Sign-in credentials.
//!
//! Inbound adapters build [`LoginCredentials`] from raw payload strings before
//! calling the identity provider port.

use thiserror::Error;
use zeroize::Zeroizing;

/// Reasons a sign-in payload is rejected before authentication.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated email and password pair.
///
/// The email is trimmed and lower-cased; the password keeps caller whitespace
/// and is wiped from memory on drop.
///
/// # Examples
/// ```
/// use avmoto_crm::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Desk@Shop.test ", "secret").unwrap();
/// assert_eq!(creds.email(), "desk@shop.test");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as provided.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
