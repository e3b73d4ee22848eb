//! Gift lists owned by exactly one user.

use chrono::{DateTime, Utc};

use super::{ListId, ListTitle, UserId};

/// A gift list. The owner is fixed at creation; there is no transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftList {
    id: ListId,
    owner_id: UserId,
    title: ListTitle,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GiftList {
    /// Create a list owned by `owner_id`.
    pub fn new(id: ListId, owner_id: UserId, title: ListTitle, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            title,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the title.
    pub fn rename(&mut self, title: ListTitle, now: DateTime<Utc>) {
        self.title = title;
        self.updated_at = now;
    }

    /// Identifier.
    pub fn id(&self) -> &ListId {
        &self.id
    }

    /// Owning user.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Title.
    pub fn title(&self) -> &ListTitle {
        &self.title
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user_id` owns the list.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}
