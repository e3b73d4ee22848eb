//! Port abstraction for the group graph.
use async_trait::async_trait;

use crate::domain::{Group, GroupId, Limit, UserId};

use super::RepositoryError;

/// Groups and their membership edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Fetch a group with members materialised.
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, RepositoryError>;

    /// Groups `user_id` owns or belongs to, oldest first.
    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<Group>, RepositoryError>;

    /// Fetch every existing group among `ids`; unknown ids are skipped.
    async fn find_many(&self, ids: &[GroupId]) -> Result<Vec<Group>, RepositoryError>;

    /// Persist a new group.
    async fn insert(&self, group: &Group) -> Result<(), RepositoryError>;

    /// Replace name, description and `updated_at`. Membership is untouched.
    async fn update(&self, group: &Group) -> Result<(), RepositoryError>;

    /// Remove the group, its memberships and every sharing edge that
    /// references it. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &GroupId) -> Result<bool, RepositoryError>;

    /// Add a membership edge under `limit`. Returns `false` when the user
    /// was already a member; that path never consults the limit.
    async fn add_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
        limit: Limit,
    ) -> Result<bool, RepositoryError>;

    /// Remove a membership edge. Returns `false` when absent.
    async fn remove_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError>;

    /// Number of explicit members.
    async fn count_members(&self, group_id: &GroupId) -> Result<usize, RepositoryError>;
}
