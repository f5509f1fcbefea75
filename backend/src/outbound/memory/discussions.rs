//! Discussion thread and comment ports over the in-memory tables.

use std::cmp::Reverse;

use async_trait::async_trait;

use crate::domain::ports::{
    DiscussionCommentRepository, DiscussionRepositoryError, DiscussionThreadRepository,
};
use crate::domain::{
    CommentFilter, CommentId, DiscussionComment, DiscussionThread, NewDiscussionComment,
    NewDiscussionThread, ThreadFilter, ThreadId,
};

use super::InMemoryStore;

#[async_trait]
impl DiscussionThreadRepository for InMemoryStore {
    async fn insert(
        &self,
        thread: &NewDiscussionThread,
    ) -> Result<DiscussionThread, DiscussionRepositoryError> {
        let mut tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables
            .threads
            .insert_with(|id| thread.clone().into_thread(ThreadId::new(id))))
    }

    async fn find(
        &self,
        id: ThreadId,
    ) -> Result<Option<DiscussionThread>, DiscussionRepositoryError> {
        let tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables.threads.get(id.get()).cloned())
    }

    /// Newest first.
    async fn list(
        &self,
        filter: &ThreadFilter,
    ) -> Result<Vec<DiscussionThread>, DiscussionRepositoryError> {
        let tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        let mut rows = tables.threads.select(|thread| filter.matches(thread));
        rows.sort_by_key(|thread| Reverse((thread.created_at, thread.id)));
        Ok(rows)
    }

    async fn count(&self, filter: &ThreadFilter) -> Result<u64, DiscussionRepositoryError> {
        let tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables
            .threads
            .values()
            .filter(|thread| filter.matches(thread))
            .count() as u64)
    }

    async fn update(&self, thread: &DiscussionThread) -> Result<bool, DiscussionRepositoryError> {
        let mut tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables.threads.replace(thread.id.get(), thread.clone()))
    }

    async fn delete(&self, id: ThreadId) -> Result<bool, DiscussionRepositoryError> {
        let mut tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables.delete_thread(id))
    }
}

#[async_trait]
impl DiscussionCommentRepository for InMemoryStore {
    async fn insert(
        &self,
        comment: &NewDiscussionComment,
    ) -> Result<DiscussionComment, DiscussionRepositoryError> {
        let mut tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables
            .comments
            .insert_with(|id| comment.clone().into_comment(CommentId::new(id))))
    }

    async fn find(
        &self,
        id: CommentId,
    ) -> Result<Option<DiscussionComment>, DiscussionRepositoryError> {
        let tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables.comments.get(id.get()).cloned())
    }

    /// Oldest first.
    async fn list(
        &self,
        filter: &CommentFilter,
    ) -> Result<Vec<DiscussionComment>, DiscussionRepositoryError> {
        let tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        let mut rows = tables.comments.select(|comment| filter.matches(comment));
        rows.sort_by_key(|comment| (comment.created_at, comment.id));
        Ok(rows)
    }

    async fn count(&self, filter: &CommentFilter) -> Result<u64, DiscussionRepositoryError> {
        let tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables
            .comments
            .values()
            .filter(|comment| filter.matches(comment))
            .count() as u64)
    }

    async fn update(
        &self,
        comment: &DiscussionComment,
    ) -> Result<bool, DiscussionRepositoryError> {
        let mut tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables.comments.replace(comment.id.get(), comment.clone()))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, DiscussionRepositoryError> {
        let mut tables = self.lock().map_err(DiscussionRepositoryError::query)?;
        Ok(tables.comments.remove(id.get()).is_some())
    }
}
