//! Invitation notifier that writes deliveries to the tracing pipeline.
//!
//! There is no mail transport yet. Operators read invitations from the
//! structured log; the token itself is only emitted at `debug` level.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    Invitation, InvitationKind, InvitationNotifier, InvitationNotifierError,
};

/// Log-only [`InvitationNotifier`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInvitationNotifier;

impl TracingInvitationNotifier {
    /// Create the notifier.
    pub fn new() -> Self {
        Self
    }
}

fn kind_label(kind: &InvitationKind) -> &'static str {
    match kind {
        InvitationKind::Registration => "registration",
        InvitationKind::GroupMembership { .. } => "group_membership",
    }
}

#[async_trait]
impl InvitationNotifier for TracingInvitationNotifier {
    async fn send_invitation(
        &self,
        invitation: &Invitation,
    ) -> Result<(), InvitationNotifierError> {
        let group = match &invitation.kind {
            InvitationKind::GroupMembership { group_name } => Some(group_name.as_str()),
            InvitationKind::Registration => None,
        };
        info!(
            email = %invitation.email,
            kind = kind_label(&invitation.kind),
            group = group,
            "invitation issued"
        );
        debug!(email = %invitation.email, token = %invitation.token, "activation token");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivationToken, Email, GroupName};
    use rstest::rstest;

    #[rstest]
    #[case::registration(InvitationKind::Registration, "registration")]
    #[case::group(
        InvitationKind::GroupMembership { group_name: GroupName::new("Family").expect("valid name") },
        "group_membership"
    )]
    #[tokio::test]
    async fn every_kind_is_delivered(#[case] kind: InvitationKind, #[case] label: &str) {
        assert_eq!(kind_label(&kind), label);
        let invitation = Invitation {
            email: Email::new("dave@example.com").expect("valid email"),
            token: ActivationToken::random(),
            kind,
        };
        TracingInvitationNotifier::new()
            .send_invitation(&invitation)
            .await
            .expect("logging never fails");
    }
}
