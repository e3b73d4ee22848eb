//! Driving port for reading lists.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, GiftList, Group, ListId, UserId};

/// How the requester relates to a list they can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListRole {
    /// The requester owns the list.
    Owner,
    /// The list reaches the requester through a shared group.
    Viewer,
}

/// A readable list with the requester's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// The list.
    pub list: GiftList,
    /// Requester's role.
    pub role: ListRole,
}

/// List read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListsQuery: Send + Sync {
    /// Fetch a list the requester can read; `NotFound` otherwise.
    async fn get_list(&self, requester: &UserId, list_id: &ListId) -> Result<ListView, Error>;

    /// Owned lists plus lists shared with any of the requester's groups,
    /// each list once, oldest first.
    async fn visible_lists(&self, requester: &UserId) -> Result<Vec<ListView>, Error>;

    /// Groups the list is shared with. The owner sees every group; a viewer
    /// sees only groups they belong to.
    async fn shared_groups(&self, requester: &UserId, list_id: &ListId)
    -> Result<Vec<Group>, Error>;
}
