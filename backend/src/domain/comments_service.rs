//! Comment use-cases.
//!
//! Comments are the one place where list ownership takes access away: the
//! owner can see the item but never its comments. The owner therefore gets
//! `Forbidden` when asking for them, while anyone who cannot see the item
//! gets `NotFound`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use super::access::{self, ListSnapshot, Visibility};
use super::ports::{
    CommentRepository, CommentsCommand, CommentsQuery, ItemRepository, ListRepository,
};
use super::service_support::{enforce, found, load_snapshot};
use super::{Comment, CommentId, CommentText, Error, Item, ItemId, Limit, LimitKind, UserId};

/// Service implementing [`CommentsCommand`] and [`CommentsQuery`].
#[derive(Clone)]
pub struct CommentsService<L, I, C> {
    lists: Arc<L>,
    items: Arc<I>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<L, I, C> CommentsService<L, I, C> {
    /// Create a service over the list, item and comment stores.
    pub fn new(lists: Arc<L>, items: Arc<I>, comments: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            lists,
            items,
            comments,
            clock,
        }
    }
}

impl<L, I, C> CommentsService<L, I, C>
where
    L: ListRepository,
    I: ItemRepository,
    C: CommentRepository,
{
    async fn item_context(
        &self,
        item_id: &ItemId,
        resource: &'static str,
    ) -> Result<(Item, ListSnapshot), Error> {
        let item = found(self.items.find_by_id(item_id).await?, resource)?;
        let snapshot = load_snapshot(self.lists.as_ref(), item.list_id(), resource).await?;
        Ok((item, snapshot))
    }

    /// Require the requester to see comments on `item_id`.
    async fn comment_thread(
        &self,
        requester: &UserId,
        item_id: &ItemId,
        action: &'static str,
    ) -> Result<Item, Error> {
        let (item, snapshot) = self.item_context(item_id, "item").await?;
        let item_visibility =
            Visibility::from(access::can_read_item(requester, &item, snapshot.access()));
        enforce(
            access::can_read_comments(requester, &item, snapshot.access()),
            item_visibility,
            requester,
            action,
            "item",
        )?;
        Ok(item)
    }

    /// Load a comment and require the requester to be its author.
    async fn authored_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
        action: &'static str,
    ) -> Result<Comment, Error> {
        let comment = found(self.comments.find_by_id(comment_id).await?, "comment")?;
        let (item, snapshot) = self.item_context(comment.item_id(), "comment").await?;
        let visibility =
            Visibility::from(access::can_read_comments(requester, &item, snapshot.access()));
        enforce(
            access::can_edit_comment(requester, &comment),
            visibility,
            requester,
            action,
            "comment",
        )?;
        Ok(comment)
    }
}

#[async_trait]
impl<L, I, C> CommentsCommand for CommentsService<L, I, C>
where
    L: ListRepository,
    I: ItemRepository,
    C: CommentRepository,
{
    async fn create_comment(
        &self,
        requester: &UserId,
        item_id: &ItemId,
        text: CommentText,
    ) -> Result<Comment, Error> {
        let (item, snapshot) = self.item_context(item_id, "item").await?;
        let item_visibility =
            Visibility::from(access::can_read_item(requester, &item, snapshot.access()));
        enforce(
            access::can_create_comment(requester, &item, snapshot.access()),
            item_visibility,
            requester,
            "create_comment",
            "item",
        )?;
        let comment = Comment::new(
            CommentId::random(),
            *item_id,
            *requester,
            text,
            self.clock.utc(),
        );
        self.comments
            .insert(&comment, Limit::new(LimitKind::Comments))
            .await?;
        info!(comment_id = %comment.id(), item_id = %item_id, "comment created");
        Ok(comment)
    }

    async fn edit_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
        text: CommentText,
    ) -> Result<Comment, Error> {
        let mut comment = self
            .authored_comment(requester, comment_id, "edit_comment")
            .await?;
        comment.edit(text, self.clock.utc());
        self.comments.update(&comment).await?;
        info!(comment_id = %comment_id, "comment edited");
        Ok(comment)
    }

    async fn delete_comment(
        &self,
        requester: &UserId,
        comment_id: &CommentId,
    ) -> Result<(), Error> {
        self.authored_comment(requester, comment_id, "delete_comment")
            .await?;
        if !self.comments.delete(comment_id).await? {
            return Err(access::not_found("comment"));
        }
        info!(comment_id = %comment_id, "comment deleted");
        Ok(())
    }
}

#[async_trait]
impl<L, I, C> CommentsQuery for CommentsService<L, I, C>
where
    L: ListRepository,
    I: ItemRepository,
    C: CommentRepository,
{
    async fn list_comments(
        &self,
        requester: &UserId,
        item_id: &ItemId,
    ) -> Result<Vec<Comment>, Error> {
        self.comment_thread(requester, item_id, "list_comments")
            .await?;
        let comments = self.comments.find_by_item(item_id).await?;
        debug!(item_id = %item_id, count = comments.len(), "comments listed");
        Ok(comments)
    }
}

#[cfg(test)]
#[path = "comments_service_tests.rs"]
mod tests;
