//! Group graph backed by [`MemoryStore`].

use async_trait::async_trait;

use super::{MemoryStore, sort_oldest_first};
use crate::domain::ports::{GroupRepository, RepositoryError};
use crate::domain::{Group, GroupId, Limit, UserId};

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, RepositoryError> {
        Ok(self.lock()?.groups.get(id).cloned())
    }

    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<Group>, RepositoryError> {
        let mut groups: Vec<Group> = self
            .lock()?
            .groups
            .values()
            .filter(|group| group.has_access(user_id))
            .cloned()
            .collect();
        sort_oldest_first(&mut groups, Group::created_at, |group| *group.id());
        Ok(groups)
    }

    async fn find_many(&self, ids: &[GroupId]) -> Result<Vec<Group>, RepositoryError> {
        let tables = self.lock()?;
        Ok(ids
            .iter()
            .filter_map(|id| tables.groups.get(id).cloned())
            .collect())
    }

    async fn insert(&self, group: &Group) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if tables.groups.contains_key(group.id()) {
            return Err(RepositoryError::duplicate("group id already exists"));
        }
        tables.groups.insert(*group.id(), group.clone());
        Ok(())
    }

    async fn update(&self, group: &Group) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        let stored = tables
            .groups
            .get_mut(group.id())
            .ok_or_else(|| RepositoryError::missing("group"))?;
        stored.update_details(group.details().clone(), group.updated_at());
        Ok(())
    }

    async fn delete(&self, id: &GroupId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        if tables.groups.remove(id).is_none() {
            return Ok(false);
        }
        tables.shares.retain(|(_, group_id)| group_id != id);
        Ok(true)
    }

    async fn add_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
        limit: Limit,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let group = tables
            .groups
            .get_mut(group_id)
            .ok_or_else(|| RepositoryError::parent_missing("group"))?;
        if group.is_member(user_id) {
            return Ok(false);
        }
        limit.admit(group.members().len())?;
        Ok(group.add_member(*user_id))
    }

    async fn remove_member(
        &self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        Ok(tables
            .groups
            .get_mut(group_id)
            .is_some_and(|group| group.remove_member(user_id)))
    }

    async fn count_members(&self, group_id: &GroupId) -> Result<usize, RepositoryError> {
        Ok(self
            .lock()?
            .groups
            .get(group_id)
            .map_or(0, |group| group.members().len()))
    }
}
