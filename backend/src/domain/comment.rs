//! Comments left on items by users other than the list owner.

use chrono::{DateTime, Utc};

use super::{CommentId, CommentText, ItemId, UserId};

/// A comment. Item and author are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    item_id: ItemId,
    author_id: UserId,
    text: CommentText,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment by `author_id` on `item_id`.
    pub fn new(
        id: CommentId,
        item_id: ItemId,
        author_id: UserId,
        text: CommentText,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_id,
            author_id,
            text,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the text.
    pub fn edit(&mut self, text: CommentText, now: DateTime<Utc>) {
        self.text = text;
        self.updated_at = now;
    }

    /// Identifier.
    pub fn id(&self) -> &CommentId {
        &self.id
    }

    /// Parent item.
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Author.
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Text.
    pub fn text(&self) -> &CommentText {
        &self.text
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user_id` wrote this comment.
    pub fn is_author(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }
}
