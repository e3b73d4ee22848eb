//! Driving port for reading items.

use async_trait::async_trait;

use crate::domain::{Error, Item, ItemId, ListId, UserId};

/// Item read use-cases. Visibility follows the parent list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsQuery: Send + Sync {
    /// Fetch one item.
    async fn get_item(&self, requester: &UserId, item_id: &ItemId) -> Result<Item, Error>;

    /// Every item on a list, oldest first.
    async fn list_items(&self, requester: &UserId, list_id: &ListId) -> Result<Vec<Item>, Error>;
}
