//! User identity model.
//!
//! Users are created pending (by self-registration or by being added to a
//! group) and activated exactly once. Activation sets the display name and
//! credential. There is no account deletion.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroize;

use super::text::{FieldValidationError, FieldViolation};
use super::{DisplayName, UserId};

/// Maximum length of an email address.
pub const EMAIL_MAX: usize = 254;

const PLACEHOLDER_CREDENTIAL: &str = "!";

/// Closed set of roles. Roles never widen access-control decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Operator account.
    Admin,
    /// Every account holds this role.
    User,
}

/// Normalised email address; unique across users.
///
/// Comparison is case-insensitive because the value is stored lower-cased.
///
/// # Examples
/// ```
/// use wishlist::domain::Email;
///
/// let email = Email::new("  Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(value: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        let normalised = value.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(FieldValidationError::new("email", FieldViolation::Required));
        }
        if normalised.chars().count() > EMAIL_MAX {
            return Err(FieldValidationError::new(
                "email",
                FieldViolation::TooLong { max: EMAIL_MAX },
            ));
        }
        if !is_plausible_address(&normalised) {
            return Err(FieldValidationError::new(
                "email",
                FieldViolation::InvalidFormat,
            ));
        }
        Ok(Self(normalised))
    }
}

fn is_plausible_address(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = FieldValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque credential digest produced by a `CredentialHasher`.
///
/// Pending users carry a placeholder that never verifies.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap a digest; blank digests are rejected.
    pub fn new(digest: impl Into<String>) -> Result<Self, FieldValidationError> {
        let digest = digest.into();
        if digest.trim().is_empty() || digest == PLACEHOLDER_CREDENTIAL {
            return Err(FieldValidationError::new(
                "credential",
                FieldViolation::Required,
            ));
        }
        Ok(Self(digest))
    }

    /// Credential assigned to users that have not activated yet.
    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_CREDENTIAL.to_owned())
    }

    /// Whether this is the never-verifying placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_CREDENTIAL
    }

    /// Borrow the digest text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(..)")
    }
}

impl Drop for CredentialHash {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// One-shot token that lets a pending user activate their account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationToken(Uuid);

impl ActivationToken {
    /// Generate a fresh token.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a token presented by a client.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        Uuid::parse_str(raw.as_ref().trim())
            .map(Self)
            .map_err(|_| FieldValidationError::new("token", FieldViolation::InvalidFormat))
    }
}

impl fmt::Display for ActivationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Reasons [`User::activate`] refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationError {
    /// The account completed activation earlier.
    AlreadyActivated,
    /// The presented token is not this user's.
    TokenMismatch,
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyActivated => write!(f, "account is already activated"),
            Self::TokenMismatch => write!(f, "activation token does not match"),
        }
    }
}

impl std::error::Error for ActivationError {}

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    display_name: Option<DisplayName>,
    credential: CredentialHash,
    activated: bool,
    roles: BTreeSet<Role>,
    activation_token: Option<ActivationToken>,
}

impl User {
    /// Create an unactivated user awaiting `token`.
    pub fn pending(id: UserId, email: Email, token: ActivationToken) -> Self {
        Self {
            id,
            email,
            display_name: None,
            credential: CredentialHash::placeholder(),
            activated: false,
            roles: BTreeSet::from([Role::User]),
            activation_token: Some(token),
        }
    }

    /// Complete activation: set name and credential, consume the token.
    pub fn activate(
        &mut self,
        token: &ActivationToken,
        display_name: DisplayName,
        credential: CredentialHash,
    ) -> Result<(), ActivationError> {
        if self.activated {
            return Err(ActivationError::AlreadyActivated);
        }
        if self.activation_token.as_ref() != Some(token) {
            return Err(ActivationError::TokenMismatch);
        }
        self.display_name = Some(display_name);
        self.credential = credential;
        self.activated = true;
        self.activation_token = None;
        Ok(())
    }

    /// Replace the editable profile fields.
    pub fn change_profile(&mut self, email: Email, display_name: Option<DisplayName>) {
        self.email = email;
        if display_name.is_some() {
            self.display_name = display_name;
        }
    }

    /// Grant an additional role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Normalised email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Display name, set at activation.
    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    /// Stored credential digest.
    pub fn credential(&self) -> &CredentialHash {
        &self.credential
    }

    /// Whether the activation flow has completed.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Assigned roles.
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Whether the user holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Outstanding activation token, if still pending.
    pub fn activation_token(&self) -> Option<&ActivationToken> {
        self.activation_token.as_ref()
    }
}

#[cfg(test)]
mod tests;
