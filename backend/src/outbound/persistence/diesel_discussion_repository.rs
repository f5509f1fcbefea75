//! PostgreSQL-backed discussion thread and comment repositories.
//!
//! Threads list newest first and comments oldest first, with the id breaking
//! ties between equal timestamps.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    DiscussionCommentRepository, DiscussionRepositoryError, DiscussionThreadRepository,
};
use crate::domain::{
    CommentFilter, CommentId, DiscussionComment, DiscussionThread, NewDiscussionComment,
    NewDiscussionThread, ThreadFilter, ThreadId,
};

use super::diesel_error_mapping::{count_to_u64, map_diesel_error, map_pool_error};
use super::models::{
    CommentChanges, CommentRow, NewCommentRow, NewThreadRow, ThreadChanges, ThreadRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{discussion_comments, discussion_threads};

/// Diesel-backed discussion thread store.
#[derive(Clone)]
pub struct DieselDiscussionThreadRepository {
    pool: DbPool,
}

impl DieselDiscussionThreadRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Diesel-backed discussion comment store.
#[derive(Clone)]
pub struct DieselDiscussionCommentRepository {
    pool: DbPool,
}

impl DieselDiscussionCommentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> DiscussionRepositoryError {
    map_pool_error(error, DiscussionRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> DiscussionRepositoryError {
    map_diesel_error(
        error,
        DiscussionRepositoryError::query,
        DiscussionRepositoryError::connection,
    )
}

fn filtered_threads(filter: &ThreadFilter) -> discussion_threads::BoxedQuery<'static, Pg> {
    let mut query = discussion_threads::table.into_boxed();
    if let Some(capsule) = filter.capsule {
        query = query.filter(discussion_threads::capsule_id.eq(capsule.get()));
    }
    if let Some(creator) = filter.created_by {
        query = query.filter(discussion_threads::created_by_id.eq(creator.get()));
    }
    query
}

fn filtered_comments(filter: &CommentFilter) -> discussion_comments::BoxedQuery<'static, Pg> {
    let mut query = discussion_comments::table.into_boxed();
    if let Some(thread) = filter.thread {
        query = query.filter(discussion_comments::thread_id.eq(thread.get()));
    }
    if let Some(author) = filter.author {
        query = query.filter(discussion_comments::author_id.eq(author.get()));
    }
    query
}

#[async_trait]
impl DiscussionThreadRepository for DieselDiscussionThreadRepository {
    async fn insert(
        &self,
        thread: &NewDiscussionThread,
    ) -> Result<DiscussionThread, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(discussion_threads::table)
            .values(NewThreadRow::from(thread))
            .returning(ThreadRow::as_returning())
            .get_result::<ThreadRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row.into())
    }

    async fn find(
        &self,
        id: ThreadId,
    ) -> Result<Option<DiscussionThread>, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = discussion_threads::table
            .find(id.get())
            .select(ThreadRow::as_select())
            .first::<ThreadRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(DiscussionThread::from))
    }

    async fn list(
        &self,
        filter: &ThreadFilter,
    ) -> Result<Vec<DiscussionThread>, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = filtered_threads(filter)
            .select(ThreadRow::as_select())
            .order((
                discussion_threads::created_at.desc(),
                discussion_threads::id.desc(),
            ))
            .load::<ThreadRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(DiscussionThread::from).collect())
    }

    async fn count(&self, filter: &ThreadFilter) -> Result<u64, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = filtered_threads(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        count_to_u64(count, DiscussionRepositoryError::query)
    }

    async fn update(&self, thread: &DiscussionThread) -> Result<bool, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(discussion_threads::table.find(thread.id.get()))
            .set(ThreadChanges::from(thread))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: ThreadId) -> Result<bool, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(discussion_threads::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}

#[async_trait]
impl DiscussionCommentRepository for DieselDiscussionCommentRepository {
    async fn insert(
        &self,
        comment: &NewDiscussionComment,
    ) -> Result<DiscussionComment, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(discussion_comments::table)
            .values(NewCommentRow::from(comment))
            .returning(CommentRow::as_returning())
            .get_result::<CommentRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row.into())
    }

    async fn find(
        &self,
        id: CommentId,
    ) -> Result<Option<DiscussionComment>, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = discussion_comments::table
            .find(id.get())
            .select(CommentRow::as_select())
            .first::<CommentRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(DiscussionComment::from))
    }

    async fn list(
        &self,
        filter: &CommentFilter,
    ) -> Result<Vec<DiscussionComment>, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = filtered_comments(filter)
            .select(CommentRow::as_select())
            .order((
                discussion_comments::created_at.asc(),
                discussion_comments::id.asc(),
            ))
            .load::<CommentRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(DiscussionComment::from).collect())
    }

    async fn count(&self, filter: &CommentFilter) -> Result<u64, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = filtered_comments(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        count_to_u64(count, DiscussionRepositoryError::query)
    }

    async fn update(
        &self,
        comment: &DiscussionComment,
    ) -> Result<bool, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::update(discussion_comments::table.find(comment.id.get()))
            .set(CommentChanges::from(comment))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: CommentId) -> Result<bool, DiscussionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let affected = diesel::delete(discussion_comments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected > 0)
    }
}
