//! Item use-cases. Access always derives from the parent list.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::access::{self, ListSnapshot, Visibility};
use super::ports::{ItemRepository, ItemsCommand, ItemsQuery, ListRepository};
use super::service_support::{enforce, found, load_snapshot};
use super::{Error, Item, ItemContent, ItemId, Limit, LimitKind, ListId, UserId};

/// Service implementing [`ItemsCommand`] and [`ItemsQuery`].
#[derive(Clone)]
pub struct ItemsService<L, I> {
    lists: Arc<L>,
    items: Arc<I>,
    clock: Arc<dyn Clock>,
}

impl<L, I> ItemsService<L, I> {
    /// Create a service over the list and item stores.
    pub fn new(lists: Arc<L>, items: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            lists,
            items,
            clock,
        }
    }
}

impl<L, I> ItemsService<L, I>
where
    L: ListRepository,
    I: ItemRepository,
{
    /// Load an item and its list, hiding both from non-readers.
    async fn readable_item(
        &self,
        requester: &UserId,
        item_id: &ItemId,
        action: &'static str,
    ) -> Result<(Item, ListSnapshot), Error> {
        let item = found(self.items.find_by_id(item_id).await?, "item")?;
        let snapshot = load_snapshot(self.lists.as_ref(), item.list_id(), "item").await?;
        enforce(
            access::can_read_item(requester, &item, snapshot.access()),
            Visibility::Hidden,
            requester,
            action,
            "item",
        )?;
        Ok((item, snapshot))
    }

    async fn writable_item(
        &self,
        requester: &UserId,
        item_id: &ItemId,
        action: &'static str,
    ) -> Result<Item, Error> {
        let (item, snapshot) = self.readable_item(requester, item_id, action).await?;
        enforce(
            access::can_write_item(requester, &item, &snapshot.list),
            Visibility::Visible,
            requester,
            action,
            "item",
        )?;
        Ok(item)
    }
}

#[async_trait]
impl<L, I> ItemsCommand for ItemsService<L, I>
where
    L: ListRepository,
    I: ItemRepository,
{
    async fn create_item(
        &self,
        requester: &UserId,
        list_id: &ListId,
        content: ItemContent,
    ) -> Result<Item, Error> {
        let snapshot = load_snapshot(self.lists.as_ref(), list_id, "list").await?;
        enforce(
            access::can_read_list(requester, snapshot.access()),
            Visibility::Hidden,
            requester,
            "create_item",
            "list",
        )?;
        enforce(
            access::can_write_list(requester, &snapshot.list),
            Visibility::Visible,
            requester,
            "create_item",
            "list",
        )?;
        let item = Item::new(ItemId::random(), *list_id, content, self.clock.utc());
        self.items
            .insert(&item, Limit::new(LimitKind::Items))
            .await?;
        info!(item_id = %item.id(), list_id = %list_id, "item created");
        Ok(item)
    }

    async fn update_item(
        &self,
        requester: &UserId,
        item_id: &ItemId,
        content: ItemContent,
    ) -> Result<Item, Error> {
        let mut item = self
            .writable_item(requester, item_id, "update_item")
            .await?;
        item.revise(content, self.clock.utc());
        self.items.update(&item).await?;
        info!(item_id = %item_id, "item updated");
        Ok(item)
    }

    async fn delete_item(&self, requester: &UserId, item_id: &ItemId) -> Result<(), Error> {
        self.writable_item(requester, item_id, "delete_item")
            .await?;
        if !self.items.delete(item_id).await? {
            return Err(access::not_found("item"));
        }
        info!(item_id = %item_id, "item deleted");
        Ok(())
    }
}

#[async_trait]
impl<L, I> ItemsQuery for ItemsService<L, I>
where
    L: ListRepository,
    I: ItemRepository,
{
    async fn get_item(&self, requester: &UserId, item_id: &ItemId) -> Result<Item, Error> {
        self.readable_item(requester, item_id, "get_item")
            .await
            .map(|(item, _)| item)
    }

    async fn list_items(&self, requester: &UserId, list_id: &ListId) -> Result<Vec<Item>, Error> {
        let snapshot = load_snapshot(self.lists.as_ref(), list_id, "list").await?;
        enforce(
            access::can_read_list(requester, snapshot.access()),
            Visibility::Hidden,
            requester,
            "list_items",
            "list",
        )?;
        Ok(self.items.find_by_list(list_id).await?)
    }
}

#[cfg(test)]
#[path = "items_service_tests.rs"]
mod tests;
