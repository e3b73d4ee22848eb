//! Driving port for list mutations and sharing.

use async_trait::async_trait;

use crate::domain::{Error, GiftList, GroupId, ListId, ListTitle, UserId};

/// List use-cases that change state. Only the list owner succeeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListsCommand: Send + Sync {
    /// Create a list owned by `owner_id`, subject to the per-user list cap.
    async fn create_list(&self, owner_id: &UserId, title: ListTitle) -> Result<GiftList, Error>;

    /// Replace the title.
    async fn rename_list(
        &self,
        requester: &UserId,
        list_id: &ListId,
        title: ListTitle,
    ) -> Result<GiftList, Error>;

    /// Delete the list with its items, comments and sharing edges.
    async fn delete_list(&self, requester: &UserId, list_id: &ListId) -> Result<(), Error>;

    /// Share with a group. Returns `false` when the edge already existed.
    async fn share_list(
        &self,
        requester: &UserId,
        list_id: &ListId,
        group_id: &GroupId,
    ) -> Result<bool, Error>;

    /// Stop sharing with a group. Returns `false` when no edge existed.
    async fn unshare_list(
        &self,
        requester: &UserId,
        list_id: &ListId,
        group_id: &GroupId,
    ) -> Result<bool, Error>;
}
