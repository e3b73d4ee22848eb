//! Items backed by [`MemoryStore`].

use async_trait::async_trait;

use super::{MemoryStore, sort_oldest_first};
use crate::domain::ports::{ItemRepository, RepositoryError};
use crate::domain::{Item, ItemId, Limit, ListId};

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, RepositoryError> {
        Ok(self.lock()?.items.get(id).cloned())
    }

    async fn find_by_list(&self, list_id: &ListId) -> Result<Vec<Item>, RepositoryError> {
        let mut items: Vec<Item> = self
            .lock()?
            .items
            .values()
            .filter(|item| item.list_id() == list_id)
            .cloned()
            .collect();
        sort_oldest_first(&mut items, Item::created_at, |item| *item.id());
        Ok(items)
    }

    async fn insert(&self, item: &Item, limit: Limit) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.lists.contains_key(item.list_id()) {
            return Err(RepositoryError::parent_missing("list"));
        }
        if tables.items.contains_key(item.id()) {
            return Err(RepositoryError::duplicate("item id already exists"));
        }
        let current = tables
            .items
            .values()
            .filter(|existing| existing.list_id() == item.list_id())
            .count();
        limit.admit(current)?;
        tables.items.insert(*item.id(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &Item) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.lists.contains_key(item.list_id()) {
            return Err(RepositoryError::parent_missing("list"));
        }
        let stored = tables
            .items
            .get_mut(item.id())
            .ok_or_else(|| RepositoryError::missing("item"))?;
        *stored = item.clone();
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.delete_item_cascade(id))
    }

    async fn count_by_list(&self, list_id: &ListId) -> Result<usize, RepositoryError> {
        Ok(self
            .lock()?
            .items
            .values()
            .filter(|item| item.list_id() == list_id)
            .count())
    }
}
