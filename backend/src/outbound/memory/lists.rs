//! Lists and sharing edges backed by [`MemoryStore`].

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{MemoryStore, sort_oldest_first};
use crate::domain::access::ListSnapshot;
use crate::domain::ports::{ListRepository, RepositoryError};
use crate::domain::{GiftList, GroupId, ItemId, Limit, ListId, UserId};

#[async_trait]
impl ListRepository for MemoryStore {
    async fn find_by_id(&self, id: &ListId) -> Result<Option<GiftList>, RepositoryError> {
        Ok(self.lock()?.lists.get(id).cloned())
    }

    async fn find_snapshot(&self, id: &ListId) -> Result<Option<ListSnapshot>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.lists.get(id).map(|list| ListSnapshot {
            list: list.clone(),
            shared_with: tables.groups_sharing(id),
        }))
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<GiftList>, RepositoryError> {
        let mut lists: Vec<GiftList> = self
            .lock()?
            .lists
            .values()
            .filter(|list| list.is_owner(owner_id))
            .cloned()
            .collect();
        sort_oldest_first(&mut lists, GiftList::created_at, |list| *list.id());
        Ok(lists)
    }

    async fn find_shared_with(
        &self,
        group_ids: &[GroupId],
    ) -> Result<Vec<GiftList>, RepositoryError> {
        let tables = self.lock()?;
        let unique: BTreeMap<ListId, GiftList> = tables
            .shares
            .iter()
            .filter(|(_, group_id)| group_ids.contains(group_id))
            .filter_map(|(list_id, _)| tables.lists.get(list_id))
            .map(|list| (*list.id(), list.clone()))
            .collect();
        let mut lists: Vec<GiftList> = unique.into_values().collect();
        sort_oldest_first(&mut lists, GiftList::created_at, |list| *list.id());
        Ok(lists)
    }

    async fn insert(&self, list: &GiftList, limit: Limit) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if tables.lists.contains_key(list.id()) {
            return Err(RepositoryError::duplicate("list id already exists"));
        }
        let owned = tables
            .lists
            .values()
            .filter(|existing| existing.owner_id() == list.owner_id())
            .count();
        limit.admit(owned)?;
        tables.lists.insert(*list.id(), list.clone());
        Ok(())
    }

    async fn update(&self, list: &GiftList) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        let stored = tables
            .lists
            .get_mut(list.id())
            .ok_or_else(|| RepositoryError::missing("list"))?;
        *stored = list.clone();
        Ok(())
    }

    async fn delete(&self, id: &ListId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        if tables.lists.remove(id).is_none() {
            return Ok(false);
        }
        let item_ids: Vec<ItemId> = tables
            .items
            .values()
            .filter(|item| item.list_id() == id)
            .map(|item| *item.id())
            .collect();
        for item_id in &item_ids {
            tables.delete_item_cascade(item_id);
        }
        tables.shares.retain(|(list_id, _)| list_id != id);
        Ok(true)
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> Result<usize, RepositoryError> {
        Ok(self
            .lock()?
            .lists
            .values()
            .filter(|list| list.is_owner(owner_id))
            .count())
    }

    async fn share(
        &self,
        list_id: &ListId,
        group_id: &GroupId,
        limit: Limit,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.lists.contains_key(list_id) {
            return Err(RepositoryError::parent_missing("list"));
        }
        if !tables.groups.contains_key(group_id) {
            return Err(RepositoryError::parent_missing("group"));
        }
        let edge = (*list_id, *group_id);
        if tables.shares.contains(&edge) {
            return Ok(false);
        }
        limit.admit(tables.share_count(list_id))?;
        Ok(tables.shares.insert(edge))
    }

    async fn unshare(&self, list_id: &ListId, group_id: &GroupId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.shares.remove(&(*list_id, *group_id)))
    }

    async fn shared_group_ids(&self, list_id: &ListId) -> Result<Vec<GroupId>, RepositoryError> {
        Ok(self
            .lock()?
            .shares
            .iter()
            .filter(|(list, _)| list == list_id)
            .map(|(_, group_id)| *group_id)
            .collect())
    }

    async fn count_shared_groups(&self, list_id: &ListId) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.share_count(list_id))
    }
}
