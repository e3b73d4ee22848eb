//! Driving port for item mutations.

use async_trait::async_trait;

use crate::domain::{Error, Item, ItemContent, ItemId, ListId, UserId};

/// Item use-cases that change state. Only the parent list's owner succeeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsCommand: Send + Sync {
    /// Add an item, subject to the per-list item cap.
    async fn create_item(
        &self,
        requester: &UserId,
        list_id: &ListId,
        content: ItemContent,
    ) -> Result<Item, Error>;

    /// Replace title and description.
    async fn update_item(
        &self,
        requester: &UserId,
        item_id: &ItemId,
        content: ItemContent,
    ) -> Result<Item, Error>;

    /// Delete the item and its comments.
    async fn delete_item(&self, requester: &UserId, item_id: &ItemId) -> Result<(), Error>;
}
