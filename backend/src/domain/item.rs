//! Items belonging to exactly one list.

use chrono::{DateTime, Utc};

use super::{ItemDescription, ItemId, ItemTitle, ListId};

/// Editable item fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemContent {
    /// Title (1–255 characters).
    pub title: ItemTitle,
    /// Optional, unbounded description.
    pub description: Option<ItemDescription>,
}

impl ItemContent {
    /// Content with a title only.
    pub fn titled(title: ItemTitle) -> Self {
        Self {
            title,
            description: None,
        }
    }
}

/// A wished-for item on a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    list_id: ListId,
    content: ItemContent,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Item {
    /// Create an item on `list_id`.
    pub fn new(id: ItemId, list_id: ListId, content: ItemContent, now: DateTime<Utc>) -> Self {
        Self {
            id,
            list_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and description.
    pub fn revise(&mut self, content: ItemContent, now: DateTime<Utc>) {
        self.content = content;
        self.updated_at = now;
    }

    /// Identifier.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Parent list.
    pub fn list_id(&self) -> &ListId {
        &self.list_id
    }

    /// Title.
    pub fn title(&self) -> &ItemTitle {
        &self.content.title
    }

    /// Description, if any.
    pub fn description(&self) -> Option<&ItemDescription> {
        self.content.description.as_ref()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
