//! Driving port for registration, activation, profile edits and login.
//!
//! Inbound adapters call [`AccountsCommand`] with already-validated values;
//! the implementation owns the identity store, the credential hasher and the
//! invitation notifier.

use async_trait::async_trait;

use crate::domain::{
    ActivationToken, DisplayName, Email, Error, LoginCredentials, Password, User, UserId,
};

/// Result of a self-registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationOutcome {
    /// The new, still pending user.
    pub user_id: UserId,
    /// Whether the activation token reached the notifier.
    pub invitation_sent: bool,
}

/// Activation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRequest {
    /// Token from the invitation.
    pub token: ActivationToken,
    /// Chosen display name.
    pub display_name: DisplayName,
    /// Chosen password.
    pub password: Password,
}

/// The only user fields that may change after activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New email; must not belong to another user.
    pub email: Email,
    /// New display name; `None` keeps the current one.
    pub display_name: Option<DisplayName>,
}

/// Account lifecycle use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Create a pending user and send the activation token.
    ///
    /// # Errors
    ///
    /// `Conflict` when the email already belongs to a user, pending or not.
    async fn register(&self, email: Email) -> Result<RegistrationOutcome, Error>;

    /// Consume the token, set name and credential.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown token, `Conflict` when already activated.
    async fn activate(&self, request: ActivationRequest) -> Result<User, Error>;

    /// Change email and optionally display name.
    async fn change_profile(&self, user_id: &UserId, update: ProfileUpdate)
    -> Result<User, Error>;

    /// Validate credentials and return the user id.
    ///
    /// # Errors
    ///
    /// Every failure is `Unauthorized` with the message "invalid credentials".
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
