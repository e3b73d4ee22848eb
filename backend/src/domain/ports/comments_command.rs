//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, CommentText, Error, ItemId, UserId};

/// Comment use-cases that change state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Comment on an item reached through a shared group. List owners are
    /// refused.
    async fn create_comment(
        &self,
        requester: &UserId,
        item_id: &ItemId,
        text: CommentText,
    ) -> Result<Comment, Error>;

    /// Replace the text. Author only.
    async fn edit_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
        text: CommentText,
    ) -> Result<Comment, Error>;

    /// Delete the comment. Author only.
    async fn delete_comment(&self, requester: &UserId, comment_id: &CommentId)
    -> Result<(), Error>;
}
