//! Port abstraction for lists and the sharing relation.
use async_trait::async_trait;

use crate::domain::access::ListSnapshot;
use crate::domain::{GiftList, GroupId, Limit, ListId, UserId};

use super::RepositoryError;

/// Lists plus their `(list, group)` sharing edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Fetch a list without its sharing edges.
    async fn find_by_id(&self, id: &ListId) -> Result<Option<GiftList>, RepositoryError>;

    /// Fetch a list together with the groups it is shared with, read
    /// atomically.
    async fn find_snapshot(&self, id: &ListId) -> Result<Option<ListSnapshot>, RepositoryError>;

    /// Lists owned by `owner_id`.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<GiftList>, RepositoryError>;

    /// Lists shared with any of `group_ids`, each list once.
    async fn find_shared_with(
        &self,
        group_ids: &[GroupId],
    ) -> Result<Vec<GiftList>, RepositoryError>;

    /// Persist a new list under the owner's list `limit`.
    async fn insert(&self, list: &GiftList, limit: Limit) -> Result<(), RepositoryError>;

    /// Replace the title and `updated_at`.
    async fn update(&self, list: &GiftList) -> Result<(), RepositoryError>;

    /// Remove the list with its items, their comments and its sharing edges.
    async fn delete(&self, id: &ListId) -> Result<bool, RepositoryError>;

    /// Number of lists owned by `owner_id`.
    async fn count_by_owner(&self, owner_id: &UserId) -> Result<usize, RepositoryError>;

    /// Add a sharing edge under `limit`. Returns `false` for an existing
    /// edge, which never consults the limit.
    async fn share(
        &self,
        list_id: &ListId,
        group_id: &GroupId,
        limit: Limit,
    ) -> Result<bool, RepositoryError>;

    /// Remove a sharing edge. Returns `false` when absent.
    async fn unshare(&self, list_id: &ListId, group_id: &GroupId) -> Result<bool, RepositoryError>;

    /// Groups the list is currently shared with.
    async fn shared_group_ids(&self, list_id: &ListId) -> Result<Vec<GroupId>, RepositoryError>;

    /// Number of sharing edges on the list.
    async fn count_shared_groups(&self, list_id: &ListId) -> Result<usize, RepositoryError>;
}
