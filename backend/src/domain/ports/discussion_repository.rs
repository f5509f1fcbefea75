//! Port abstractions for discussion threads and comments.

use async_trait::async_trait;

use crate::domain::{
    CommentFilter, CommentId, DiscussionComment, DiscussionThread, NewDiscussionComment,
    NewDiscussionThread, ThreadFilter, ThreadId,
};

use super::{define_port_error, map_port_error};

define_port_error! {
    /// Errors raised by discussion repository adapters.
    pub enum DiscussionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "discussion repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "discussion repository query failed: {message}",
    }
}

map_port_error!(DiscussionRepositoryError, "discussion repository");

/// Persistence for discussion threads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscussionThreadRepository: Send + Sync {
    /// Insert a thread and return the stored row.
    async fn insert(
        &self,
        thread: &NewDiscussionThread,
    ) -> Result<DiscussionThread, DiscussionRepositoryError>;

    /// Fetch a thread by id.
    async fn find(&self, id: ThreadId)
    -> Result<Option<DiscussionThread>, DiscussionRepositoryError>;

    /// Threads matching `filter`, newest first.
    async fn list(
        &self,
        filter: &ThreadFilter,
    ) -> Result<Vec<DiscussionThread>, DiscussionRepositoryError>;

    /// Number of threads matching `filter`.
    async fn count(&self, filter: &ThreadFilter) -> Result<u64, DiscussionRepositoryError>;

    /// Overwrite a stored thread. Returns `false` when the row is gone.
    async fn update(&self, thread: &DiscussionThread) -> Result<bool, DiscussionRepositoryError>;

    /// Delete a thread and its comments. Returns `false` when the row is gone.
    async fn delete(&self, id: ThreadId) -> Result<bool, DiscussionRepositoryError>;
}

/// Persistence for discussion comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscussionCommentRepository: Send + Sync {
    /// Insert a comment and return the stored row.
    async fn insert(
        &self,
        comment: &NewDiscussionComment,
    ) -> Result<DiscussionComment, DiscussionRepositoryError>;

    /// Fetch a comment by id.
    async fn find(
        &self,
        id: CommentId,
    ) -> Result<Option<DiscussionComment>, DiscussionRepositoryError>;

    /// Comments matching `filter`, oldest first.
    async fn list(
        &self,
        filter: &CommentFilter,
    ) -> Result<Vec<DiscussionComment>, DiscussionRepositoryError>;

    /// Number of comments matching `filter`.
    async fn count(&self, filter: &CommentFilter) -> Result<u64, DiscussionRepositoryError>;

    /// Overwrite a stored comment. Returns `false` when the row is gone.
    async fn update(&self, comment: &DiscussionComment)
    -> Result<bool, DiscussionRepositoryError>;

    /// Delete a comment. Returns `false` when the row is gone.
    async fn delete(&self, id: CommentId) -> Result<bool, DiscussionRepositoryError>;
}
