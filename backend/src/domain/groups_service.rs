//! Group and membership use-cases, including the invite-on-add flow.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use super::access::{self, Visibility};
use super::ports::{
    GroupRepository, GroupsCommand, GroupsQuery, Invitation, InvitationKind, InvitationNotifier,
    MemberAdded, RepositoryError, UserRepository,
};
use super::service_support::{enforce, found};
use super::{
    ActivationToken, Email, Error, Group, GroupDetails, GroupId, Limit, LimitKind, User, UserId,
};

/// Service implementing [`GroupsCommand`] and [`GroupsQuery`].
#[derive(Clone)]
pub struct GroupsService<G, U> {
    groups: Arc<G>,
    users: Arc<U>,
    notifier: Arc<dyn InvitationNotifier>,
    clock: Arc<dyn Clock>,
}

impl<G, U> GroupsService<G, U> {
    /// Create a service over the group graph and identity store.
    pub fn new(
        groups: Arc<G>,
        users: Arc<U>,
        notifier: Arc<dyn InvitationNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            groups,
            users,
            notifier,
            clock,
        }
    }
}

impl<G, U> GroupsService<G, U>
where
    G: GroupRepository,
    U: UserRepository,
{
    async fn readable_group(
        &self,
        requester: &UserId,
        group_id: &GroupId,
        action: &'static str,
    ) -> Result<Group, Error> {
        let group = found(self.groups.find_by_id(group_id).await?, "group")?;
        enforce(
            access::can_read_group(requester, &group),
            Visibility::Hidden,
            requester,
            action,
            "group",
        )?;
        Ok(group)
    }

    async fn managed_group(
        &self,
        requester: &UserId,
        group_id: &GroupId,
        action: &'static str,
    ) -> Result<Group, Error> {
        let group = self.readable_group(requester, group_id, action).await?;
        enforce(
            access::can_manage_group(requester, &group),
            Visibility::Visible,
            requester,
            action,
            "group",
        )?;
        Ok(group)
    }

    /// Find the user behind `email`, creating and inviting a pending user
    /// when nobody holds it yet. Returns the user id and whether an invite
    /// was issued.
    async fn resolve_or_invite(
        &self,
        group: &Group,
        email: &Email,
    ) -> Result<(UserId, bool), Error> {
        if let Some(user) = self.users.find_by_email(email).await? {
            return Ok((*user.id(), false));
        }

        // A pending user must not outlive a full group.
        let current = self.groups.count_members(group.id()).await?;
        Limit::new(LimitKind::GroupMembers).admit(current)?;

        let token = ActivationToken::random();
        let pending = User::pending(UserId::random(), email.clone(), token);
        match self.users.insert(&pending).await {
            Ok(()) => {}
            Err(RepositoryError::Duplicate { .. }) => {
                // Lost a race with another registration for the same email.
                let existing = found(self.users.find_by_email(email).await?, "user")?;
                return Ok((*existing.id(), false));
            }
            Err(err) => return Err(err.into()),
        }
        info!(user_id = %pending.id(), group_id = %group.id(), "pending user created for invite");

        let invitation = Invitation {
            email: email.clone(),
            token,
            kind: InvitationKind::GroupMembership {
                group_name: group.name().clone(),
            },
        };
        if let Err(err) = self.notifier.send_invitation(&invitation).await {
            warn!(user_id = %pending.id(), error = %err, "invitation delivery failed");
        }
        Ok((*pending.id(), true))
    }
}

#[async_trait]
impl<G, U> GroupsCommand for GroupsService<G, U>
where
    G: GroupRepository,
    U: UserRepository,
{
    async fn create_group(
        &self,
        owner_id: &UserId,
        details: GroupDetails,
    ) -> Result<Group, Error> {
        let group = Group::new(GroupId::random(), *owner_id, details, self.clock.utc());
        self.groups.insert(&group).await?;
        info!(group_id = %group.id(), owner_id = %owner_id, "group created");
        Ok(group)
    }

    async fn update_group(
        &self,
        requester: &UserId,
        group_id: &GroupId,
        details: GroupDetails,
    ) -> Result<Group, Error> {
        let mut group = self
            .managed_group(requester, group_id, "update_group")
            .await?;
        group.update_details(details, self.clock.utc());
        self.groups.update(&group).await?;
        info!(group_id = %group_id, "group updated");
        Ok(group)
    }

    async fn delete_group(&self, requester: &UserId, group_id: &GroupId) -> Result<(), Error> {
        self.managed_group(requester, group_id, "delete_group")
            .await?;
        if !self.groups.delete(group_id).await? {
            return Err(access::not_found("group"));
        }
        info!(group_id = %group_id, "group deleted");
        Ok(())
    }

    async fn add_member(
        &self,
        requester: &UserId,
        group_id: &GroupId,
        email: Email,
    ) -> Result<MemberAdded, Error> {
        let group = self.readable_group(requester, group_id, "add_member").await?;
        enforce(
            access::can_add_member(requester, &group),
            Visibility::Visible,
            requester,
            "add_member",
            "group",
        )?;

        let (user_id, invited) = self.resolve_or_invite(&group, &email).await?;
        let added = self
            .groups
            .add_member(group_id, &user_id, Limit::new(LimitKind::GroupMembers))
            .await?;
        if added {
            info!(group_id = %group_id, user_id = %user_id, invited, "member added");
        } else {
            debug!(group_id = %group_id, user_id = %user_id, "already a member");
        }
        Ok(MemberAdded {
            user_id,
            email,
            invited,
            added,
        })
    }

    async fn remove_member(
        &self,
        requester: &UserId,
        group_id: &GroupId,
        member_id: &UserId,
    ) -> Result<(), Error> {
        let group = self
            .readable_group(requester, group_id, "remove_member")
            .await?;
        enforce(
            access::can_remove_member(requester, &group, member_id),
            Visibility::Visible,
            requester,
            "remove_member",
            "group",
        )?;
        if !self.groups.remove_member(group_id, member_id).await? {
            return Err(access::not_found("member"));
        }
        info!(group_id = %group_id, user_id = %member_id, "member removed");
        Ok(())
    }
}

#[async_trait]
impl<G, U> GroupsQuery for GroupsService<G, U>
where
    G: GroupRepository,
    U: UserRepository,
{
    async fn get_group(&self, requester: &UserId, group_id: &GroupId) -> Result<Group, Error> {
        self.readable_group(requester, group_id, "get_group").await
    }

    async fn groups_for_user(&self, requester: &UserId) -> Result<Vec<Group>, Error> {
        Ok(self.groups.find_for_user(requester).await?)
    }
}

#[cfg(test)]
#[path = "groups_service_tests.rs"]
mod tests;
