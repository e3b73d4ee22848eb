//! Authentication primitives: passwords and login credentials.
//!
//! Inbound adapters construct these from raw strings before calling the
//! accounts port, so payload parsing stays outside the services.

use std::fmt;

use zeroize::Zeroizing;

use super::Email;
use super::text::{FieldValidationError, FieldViolation};

/// A caller-supplied password, wiped from memory on drop.
///
/// Whitespace is preserved; only an empty value is rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept any non-empty password.
    pub fn new(raw: &str) -> Result<Self, FieldValidationError> {
        if raw.is_empty() {
            return Err(FieldValidationError::new(
                "password",
                FieldViolation::Required,
            ));
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the secret.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use wishlist::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com ", "hunter2").expect("valid");
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password().expose(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Password,
}

impl LoginCredentials {
    /// Validate raw email and password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FieldValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }

    /// Normalised email used for the user lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}
