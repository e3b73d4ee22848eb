//! Port for delivering activation tokens to people who are not yet users.
use async_trait::async_trait;

use crate::domain::{ActivationToken, Email, GroupName};

use super::define_port_error;

/// Why an invitation is being sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationKind {
    /// The person registered themselves.
    Registration,
    /// A group owner added the person's email to a group.
    GroupMembership {
        /// Name of the inviting group.
        group_name: GroupName,
    },
}

/// Activation token addressed to a pending user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    /// Recipient address.
    pub email: Email,
    /// One-shot token required to activate the account.
    pub token: ActivationToken,
    /// Trigger for the invitation.
    pub kind: InvitationKind,
}

define_port_error! {
    /// Delivery failures raised by notifier adapters.
    pub enum InvitationNotifierError {
        /// The message could not be handed off.
        Delivery { message: String } => "invitation delivery failed: {message}",
    }
}

/// Outbound channel for invitations.
///
/// Delivery is best effort: services log a failure and carry on, since the
/// pending user already exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationNotifier: Send + Sync {
    /// Deliver `invitation`.
    async fn send_invitation(&self, invitation: &Invitation)
    -> Result<(), InvitationNotifierError>;
}
