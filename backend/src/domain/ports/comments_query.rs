//! Driving port for reading comments.

use async_trait::async_trait;

use crate::domain::{Comment, Error, ItemId, UserId};

/// Comment read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// Comments on an item, oldest first.
    ///
    /// # Errors
    ///
    /// The list owner receives `Forbidden` with reason `owner_comment_blind`;
    /// a requester who cannot see the item receives `NotFound`.
    async fn list_comments(
        &self,
        requester: &UserId,
        item_id: &ItemId,
    ) -> Result<Vec<Comment>, Error>;
}
