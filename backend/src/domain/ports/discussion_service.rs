//! Driving port for discussion use-cases.

use async_trait::async_trait;

use crate::domain::{
    CapsuleId, CommentDetail, CommentFilter, CommentId, Error, ProfileId, ThreadDetail,
    ThreadFilter, ThreadId,
};

/// Fields accepted when opening a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateThreadRequest {
    /// Capsule under discussion.
    pub capsule: CapsuleId,
    /// Thread title.
    pub title: String,
    /// Authenticated caller, recorded as creator.
    pub created_by: ProfileId,
}

/// Overwrite of a thread by its creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateThreadRequest {
    /// Thread to overwrite.
    pub id: ThreadId,
    /// Authenticated caller.
    pub caller: ProfileId,
    /// Replacement capsule, if any.
    pub capsule: Option<CapsuleId>,
    /// Thread title; required, checked after authorship.
    pub title: Option<String>,
}

/// Fields accepted when posting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    /// Thread being commented on.
    pub thread: ThreadId,
    /// Comment body.
    pub content: String,
    /// Authenticated caller, recorded as author.
    pub author: ProfileId,
}

/// Overwrite of a comment by its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommentRequest {
    /// Comment to overwrite.
    pub id: CommentId,
    /// Authenticated caller.
    pub caller: ProfileId,
    /// Replacement thread, if any.
    pub thread: Option<ThreadId>,
    /// Comment body; required, checked after authorship.
    pub content: Option<String>,
}

/// Domain use-case port for threads and comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscussionService: Send + Sync {
    /// Threads matching `filter`, newest first.
    async fn list_threads(&self, filter: ThreadFilter) -> Result<Vec<ThreadDetail>, Error>;

    /// Fetch one thread.
    async fn get_thread(&self, id: ThreadId) -> Result<ThreadDetail, Error>;

    /// Open a thread.
    async fn create_thread(&self, request: CreateThreadRequest) -> Result<ThreadDetail, Error>;

    /// Overwrite a thread; only its creator may.
    async fn update_thread(&self, request: UpdateThreadRequest) -> Result<(), Error>;

    /// Delete a thread; only its creator may.
    async fn delete_thread(&self, id: ThreadId, caller: ProfileId) -> Result<(), Error>;

    /// Comments matching `filter`, oldest first.
    async fn list_comments(&self, filter: CommentFilter) -> Result<Vec<CommentDetail>, Error>;

    /// Fetch one comment.
    async fn get_comment(&self, id: CommentId) -> Result<CommentDetail, Error>;

    /// Post a comment.
    async fn create_comment(&self, request: CreateCommentRequest)
    -> Result<CommentDetail, Error>;

    /// Overwrite a comment; only its author may.
    async fn update_comment(&self, request: UpdateCommentRequest) -> Result<(), Error>;

    /// Delete a comment; only its author may.
    async fn delete_comment(&self, id: CommentId, caller: ProfileId) -> Result<(), Error>;
}
