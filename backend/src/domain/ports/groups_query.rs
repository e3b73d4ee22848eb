//! Driving port for reading groups.

use async_trait::async_trait;

use crate::domain::{Error, Group, GroupId, UserId};

/// Group read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupsQuery: Send + Sync {
    /// Fetch a group the requester owns or belongs to; `NotFound` otherwise.
    async fn get_group(&self, requester: &UserId, group_id: &GroupId) -> Result<Group, Error>;

    /// Groups the requester owns or belongs to.
    async fn groups_for_user(&self, requester: &UserId) -> Result<Vec<Group>, Error>;
}
