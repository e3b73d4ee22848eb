//! In-memory store implementing every repository port.
//!
//! All tables live behind one [`Mutex`]. Each port call takes the lock once,
//! so count-then-insert sequences and cascading deletes are atomic with
//! respect to each other. A poisoned lock is reported as a `Query` error.

mod comments;
mod groups;
mod items;
mod lists;
mod users;

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::ports::RepositoryError;
use crate::domain::{
    ActivationToken, Comment, CommentId, Email, GiftList, Group, GroupId, Item, ItemId, ListId,
    User, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    emails: HashMap<Email, UserId>,
    tokens: HashMap<ActivationToken, UserId>,
    groups: HashMap<GroupId, Group>,
    lists: HashMap<ListId, GiftList>,
    shares: BTreeSet<(ListId, GroupId)>,
    items: HashMap<ItemId, Item>,
    comments: HashMap<CommentId, Comment>,
}

impl Tables {
    fn groups_sharing(&self, list_id: &ListId) -> Vec<Group> {
        let mut groups: Vec<Group> = self
            .shares
            .iter()
            .filter(|(list, _)| list == list_id)
            .filter_map(|(_, group_id)| self.groups.get(group_id).cloned())
            .collect();
        sort_oldest_first(&mut groups, Group::created_at, |group| *group.id());
        groups
    }

    fn share_count(&self, list_id: &ListId) -> usize {
        self.shares
            .iter()
            .filter(|(list, _)| list == list_id)
            .count()
    }

    fn delete_item_cascade(&mut self, item_id: &ItemId) -> bool {
        if self.items.remove(item_id).is_none() {
            return false;
        }
        self.comments
            .retain(|_, comment| comment.item_id() != item_id);
        true
    }
}

/// Thread-safe in-memory implementation of the persistence ports.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use wishlist::outbound::memory::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new());
/// assert_eq!(Arc::strong_count(&store), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::query("memory store lock poisoned"))
    }
}

fn sort_oldest_first<T, K: Ord>(
    rows: &mut [T],
    created_at: impl Fn(&T) -> DateTime<Utc>,
    id: impl Fn(&T) -> K,
) {
    rows.sort_by(|a, b| {
        created_at(a)
            .cmp(&created_at(b))
            .then_with(|| id(a).cmp(&id(b)))
    });
}
