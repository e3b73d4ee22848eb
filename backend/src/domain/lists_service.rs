//! List and sharing use-cases.
//!
//! Every operation loads a fresh [`ListSnapshot`](super::access::ListSnapshot),
//! asks the access engine, then calls the store. Readers who are not the
//! owner learn the list exists, so their write attempts are `Forbidden`;
//! everyone else gets `NotFound`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use super::access::{self, ListSnapshot, Visibility};
use super::ports::{
    GroupRepository, ListRepository, ListRole, ListView, ListsCommand, ListsQuery,
};
use super::service_support::{enforce, found, load_snapshot};
use super::{Error, GiftList, Group, GroupId, Limit, LimitKind, ListId, ListTitle, UserId};

/// Service implementing [`ListsCommand`] and [`ListsQuery`].
#[derive(Clone)]
pub struct ListsService<L, G> {
    lists: Arc<L>,
    groups: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<L, G> ListsService<L, G> {
    /// Create a service over the list store and group graph.
    pub fn new(lists: Arc<L>, groups: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            lists,
            groups,
            clock,
        }
    }
}

impl<L, G> ListsService<L, G>
where
    L: ListRepository,
    G: GroupRepository,
{
    /// Load the list and require the requester to own it.
    async fn owned_snapshot(
        &self,
        requester: &UserId,
        list_id: &ListId,
        action: &'static str,
    ) -> Result<ListSnapshot, Error> {
        let snapshot = load_snapshot(self.lists.as_ref(), list_id, "list").await?;
        let read = access::can_read_list(requester, snapshot.access());
        enforce(read, Visibility::Hidden, requester, action, "list")?;
        enforce(
            access::can_write_list(requester, &snapshot.list),
            Visibility::Visible,
            requester,
            action,
            "list",
        )?;
        Ok(snapshot)
    }

    fn view(requester: &UserId, list: GiftList) -> ListView {
        let role = if list.is_owner(requester) {
            ListRole::Owner
        } else {
            ListRole::Viewer
        };
        ListView { list, role }
    }
}

#[async_trait]
impl<L, G> ListsCommand for ListsService<L, G>
where
    L: ListRepository,
    G: GroupRepository,
{
    async fn create_list(&self, owner_id: &UserId, title: ListTitle) -> Result<GiftList, Error> {
        let list = GiftList::new(ListId::random(), *owner_id, title, self.clock.utc());
        self.lists
            .insert(&list, Limit::new(LimitKind::Lists))
            .await?;
        info!(list_id = %list.id(), owner_id = %owner_id, "list created");
        Ok(list)
    }

    async fn rename_list(
        &self,
        requester: &UserId,
        list_id: &ListId,
        title: ListTitle,
    ) -> Result<GiftList, Error> {
        let mut list = self
            .owned_snapshot(requester, list_id, "rename_list")
            .await?
            .list;
        list.rename(title, self.clock.utc());
        self.lists.update(&list).await?;
        info!(list_id = %list_id, "list renamed");
        Ok(list)
    }

    async fn delete_list(&self, requester: &UserId, list_id: &ListId) -> Result<(), Error> {
        self.owned_snapshot(requester, list_id, "delete_list")
            .await?;
        if !self.lists.delete(list_id).await? {
            return Err(access::not_found("list"));
        }
        info!(list_id = %list_id, "list deleted");
        Ok(())
    }

    async fn share_list(
        &self,
        requester: &UserId,
        list_id: &ListId,
        group_id: &GroupId,
    ) -> Result<bool, Error> {
        self.owned_snapshot(requester, list_id, "share_list")
            .await?;
        let group = found(self.groups.find_by_id(group_id).await?, "group")?;
        enforce(
            access::can_read_group(requester, &group),
            Visibility::Hidden,
            requester,
            "share_list",
            "group",
        )?;
        let added = self
            .lists
            .share(list_id, group_id, Limit::new(LimitKind::SharedGroups))
            .await?;
        if added {
            info!(list_id = %list_id, group_id = %group_id, "list shared");
        } else {
            debug!(list_id = %list_id, group_id = %group_id, "list already shared");
        }
        Ok(added)
    }

    async fn unshare_list(
        &self,
        requester: &UserId,
        list_id: &ListId,
        group_id: &GroupId,
    ) -> Result<bool, Error> {
        self.owned_snapshot(requester, list_id, "unshare_list")
            .await?;
        let removed = self.lists.unshare(list_id, group_id).await?;
        if removed {
            info!(list_id = %list_id, group_id = %group_id, "list unshared");
        }
        Ok(removed)
    }
}

#[async_trait]
impl<L, G> ListsQuery for ListsService<L, G>
where
    L: ListRepository,
    G: GroupRepository,
{
    async fn get_list(&self, requester: &UserId, list_id: &ListId) -> Result<ListView, Error> {
        let snapshot = load_snapshot(self.lists.as_ref(), list_id, "list").await?;
        enforce(
            access::can_read_list(requester, snapshot.access()),
            Visibility::Hidden,
            requester,
            "get_list",
            "list",
        )?;
        Ok(Self::view(requester, snapshot.list))
    }

    async fn visible_lists(&self, requester: &UserId) -> Result<Vec<ListView>, Error> {
        let owned = self.lists.find_by_owner(requester).await?;
        let group_ids: Vec<GroupId> = self
            .groups
            .find_for_user(requester)
            .await?
            .iter()
            .map(|group| *group.id())
            .collect();
        let shared = if group_ids.is_empty() {
            Vec::new()
        } else {
            self.lists.find_shared_with(&group_ids).await?
        };

        let mut unique: BTreeMap<ListId, GiftList> = BTreeMap::new();
        for list in owned.into_iter().chain(shared) {
            unique.entry(*list.id()).or_insert(list);
        }
        let mut views: Vec<ListView> = unique
            .into_values()
            .map(|list| Self::view(requester, list))
            .collect();
        views.sort_by(|a, b| {
            a.list
                .created_at()
                .cmp(&b.list.created_at())
                .then_with(|| a.list.id().cmp(b.list.id()))
        });
        debug!(requester = %requester, count = views.len(), "visible lists resolved");
        Ok(views)
    }

    async fn shared_groups(
        &self,
        requester: &UserId,
        list_id: &ListId,
    ) -> Result<Vec<Group>, Error> {
        let snapshot = load_snapshot(self.lists.as_ref(), list_id, "list").await?;
        enforce(
            access::can_read_list(requester, snapshot.access()),
            Visibility::Hidden,
            requester,
            "shared_groups",
            "list",
        )?;
        let owner = snapshot.list.is_owner(requester);
        Ok(snapshot
            .shared_with
            .into_iter()
            .filter(|group| owner || group.has_access(requester))
            .collect())
    }
}

#[cfg(test)]
#[path = "lists_service_tests.rs"]
mod tests;
