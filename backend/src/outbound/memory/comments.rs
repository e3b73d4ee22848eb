//! Comments backed by [`MemoryStore`].

use async_trait::async_trait;

use super::{MemoryStore, sort_oldest_first};
use crate::domain::ports::{CommentRepository, RepositoryError};
use crate::domain::{Comment, CommentId, ItemId, Limit};

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        Ok(self.lock()?.comments.get(id).cloned())
    }

    async fn find_by_item(&self, item_id: &ItemId) -> Result<Vec<Comment>, RepositoryError> {
        let mut comments: Vec<Comment> = self
            .lock()?
            .comments
            .values()
            .filter(|comment| comment.item_id() == item_id)
            .cloned()
            .collect();
        sort_oldest_first(&mut comments, Comment::created_at, |comment| *comment.id());
        Ok(comments)
    }

    async fn insert(&self, comment: &Comment, limit: Limit) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.items.contains_key(comment.item_id()) {
            return Err(RepositoryError::parent_missing("item"));
        }
        if tables.comments.contains_key(comment.id()) {
            return Err(RepositoryError::duplicate("comment id already exists"));
        }
        let current = tables
            .comments
            .values()
            .filter(|existing| existing.item_id() == comment.item_id())
            .count();
        limit.admit(current)?;
        tables.comments.insert(*comment.id(), comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.items.contains_key(comment.item_id()) {
            return Err(RepositoryError::parent_missing("item"));
        }
        let stored = tables
            .comments
            .get_mut(comment.id())
            .ok_or_else(|| RepositoryError::missing("comment"))?;
        *stored = comment.clone();
        Ok(())
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.comments.remove(id).is_some())
    }

    async fn count_by_item(&self, item_id: &ItemId) -> Result<usize, RepositoryError> {
        Ok(self
            .lock()?
            .comments
            .values()
            .filter(|comment| comment.item_id() == item_id)
            .count())
    }
}
