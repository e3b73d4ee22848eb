//! Port abstraction for list items.
use async_trait::async_trait;

use crate::domain::{Item, ItemId, Limit, ListId};

use super::RepositoryError;

/// Items and their parent list reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetch an item.
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, RepositoryError>;

    /// Items on a list, oldest first.
    async fn find_by_list(&self, list_id: &ListId) -> Result<Vec<Item>, RepositoryError>;

    /// Persist a new item under the list's item `limit`. `ParentMissing`
    /// when the list is gone.
    async fn insert(&self, item: &Item, limit: Limit) -> Result<(), RepositoryError>;

    /// Replace title, description and `updated_at`.
    async fn update(&self, item: &Item) -> Result<(), RepositoryError>;

    /// Remove the item and its comments.
    async fn delete(&self, id: &ItemId) -> Result<bool, RepositoryError>;

    /// Number of items on a list.
    async fn count_by_list(&self, list_id: &ListId) -> Result<usize, RepositoryError>;
}
