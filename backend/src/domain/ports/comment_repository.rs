//! Port abstraction for item comments.
use async_trait::async_trait;

use crate::domain::{Comment, CommentId, ItemId, Limit};

use super::RepositoryError;

/// Comments and their parent item reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fetch a comment.
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError>;

    /// Comments on an item, oldest first.
    async fn find_by_item(&self, item_id: &ItemId) -> Result<Vec<Comment>, RepositoryError>;

    /// Persist a new comment under the item's comment `limit`.
    /// `ParentMissing` when the item is gone.
    async fn insert(&self, comment: &Comment, limit: Limit) -> Result<(), RepositoryError>;

    /// Replace text and `updated_at`.
    async fn update(&self, comment: &Comment) -> Result<(), RepositoryError>;

    /// Remove the comment.
    async fn delete(&self, id: &CommentId) -> Result<bool, RepositoryError>;

    /// Number of comments on an item.
    async fn count_by_item(&self, item_id: &ItemId) -> Result<usize, RepositoryError>;
}
