//! Driving port for group mutations and membership.

use async_trait::async_trait;

use crate::domain::{Email, Error, Group, GroupDetails, GroupId, UserId};

/// Outcome of adding a member by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAdded {
    /// The resolved or newly created user.
    pub user_id: UserId,
    /// The normalised email that was added.
    pub email: Email,
    /// Whether a pending user was created and invited.
    pub invited: bool,
    /// `false` when the user was already a member.
    pub added: bool,
}

/// Group use-cases that change state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupsCommand: Send + Sync {
    /// Create a group owned by `owner_id`. The owner is not added to
    /// `members`.
    async fn create_group(&self, owner_id: &UserId, details: GroupDetails)
    -> Result<Group, Error>;

    /// Replace name and description. Owner only.
    async fn update_group(
        &self,
        requester: &UserId,
        group_id: &GroupId,
        details: GroupDetails,
    ) -> Result<Group, Error>;

    /// Delete the group, its memberships and its sharing edges. Owner only.
    async fn delete_group(&self, requester: &UserId, group_id: &GroupId) -> Result<(), Error>;

    /// Add a member by email, inviting unknown addresses. Owner only.
    async fn add_member(
        &self,
        requester: &UserId,
        group_id: &GroupId,
        email: Email,
    ) -> Result<MemberAdded, Error>;

    /// Remove a member. The owner may remove anyone; members may leave.
    async fn remove_member(
        &self,
        requester: &UserId,
        group_id: &GroupId,
        member_id: &UserId,
    ) -> Result<(), Error>;
}
