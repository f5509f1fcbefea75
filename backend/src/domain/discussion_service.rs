//! Discussion thread and comment domain service.
//!
//! Threads and comments may only be changed or removed by the profile that
//! created them. Updates resolve the target first, then the author, then the
//! body, so a stranger sending an empty body to a missing id sees 404 and
//! one sending it to someone else's thread sees 403.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::error;

use crate::domain::ports::{
    AccountRepository, CapsuleRepository, CreateCommentRequest, CreateThreadRequest,
    DiscussionCommentRepository, DiscussionService, DiscussionThreadRepository,
    UpdateCommentRequest, UpdateThreadRequest,
};
use crate::domain::service_support::{ensure_max_chars, referenced_but_missing, required};
use crate::domain::{
    CapsuleId, CommentDetail, CommentFilter, CommentId, DiscussionComment, DiscussionThread,
    Error, NewDiscussionComment, NewDiscussionThread, ProfileId, THREAD_TITLE_MAX_CHARS,
    ThreadDetail, ThreadFilter, ThreadId, UserProfile,
};

const INVALID_CAPSULE: &str = "Invalid capsule id sent";
const INVALID_THREAD: &str = "Invalid thread id sent";

fn thread_not_found() -> Error {
    Error::not_found("Discussion thread not found")
}

fn comment_not_found() -> Error {
    Error::not_found("Discussion comment not found")
}

fn ensure_owner(owner: ProfileId, caller: ProfileId, reason: &str) -> Result<(), Error> {
    if owner == caller {
        Ok(())
    } else {
        Err(Error::forbidden(reason))
    }
}

/// Discussion service implementing [`DiscussionService`].
#[derive(Clone)]
pub struct Discussions {
    threads: Arc<dyn DiscussionThreadRepository>,
    comments: Arc<dyn DiscussionCommentRepository>,
    capsules: Arc<dyn CapsuleRepository>,
    accounts: Arc<dyn AccountRepository>,
    clock: Arc<dyn Clock>,
}

impl Discussions {
    /// Create the service over its repositories and clock.
    pub fn new(
        threads: Arc<dyn DiscussionThreadRepository>,
        comments: Arc<dyn DiscussionCommentRepository>,
        capsules: Arc<dyn CapsuleRepository>,
        accounts: Arc<dyn AccountRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            threads,
            comments,
            capsules,
            accounts,
            clock,
        }
    }

    async fn require_capsule(&self, id: CapsuleId) -> Result<(), Error> {
        match self.capsules.find(id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(INVALID_CAPSULE)),
        }
    }

    async fn find_thread(&self, id: ThreadId) -> Result<DiscussionThread, Error> {
        self.threads.find(id).await?.ok_or_else(thread_not_found)
    }

    async fn find_comment(&self, id: CommentId) -> Result<DiscussionComment, Error> {
        self.comments.find(id).await?.ok_or_else(comment_not_found)
    }

    async fn stored_profile(&self, id: ProfileId) -> Result<UserProfile, Error> {
        self.accounts
            .find_profile(id)
            .await?
            .ok_or_else(|| referenced_but_missing("profile", id))
    }

    async fn thread_detail(&self, thread: DiscussionThread) -> Result<ThreadDetail, Error> {
        let capsule = self
            .capsules
            .find(thread.capsule)
            .await?
            .ok_or_else(|| referenced_but_missing("capsule", thread.capsule))?;
        let created_by = self.stored_profile(thread.created_by).await?;
        let comment_count = self
            .comments
            .count(&CommentFilter {
                thread: Some(thread.id),
                ..CommentFilter::default()
            })
            .await?;
        Ok(ThreadDetail {
            thread,
            capsule,
            created_by,
            comment_count,
        })
    }

    async fn comment_detail(&self, comment: DiscussionComment) -> Result<CommentDetail, Error> {
        let thread = self
            .threads
            .find(comment.thread)
            .await?
            .ok_or_else(|| referenced_but_missing("discussion thread", comment.thread))?;
        let author = self.stored_profile(comment.author).await?;
        Ok(CommentDetail {
            comment,
            thread,
            author,
        })
    }
}

#[async_trait]
impl DiscussionService for Discussions {
    async fn list_threads(&self, filter: ThreadFilter) -> Result<Vec<ThreadDetail>, Error> {
        let rows = self.threads.list(&filter).await?;
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.thread_detail(row).await?);
        }
        Ok(details)
    }

    async fn get_thread(&self, id: ThreadId) -> Result<ThreadDetail, Error> {
        let thread = self.find_thread(id).await?;
        self.thread_detail(thread).await
    }

    async fn create_thread(&self, request: CreateThreadRequest) -> Result<ThreadDetail, Error> {
        ensure_max_chars("title", &request.title, THREAD_TITLE_MAX_CHARS)?;
        self.require_capsule(request.capsule).await?;

        let thread = self
            .threads
            .insert(&NewDiscussionThread {
                capsule: request.capsule,
                title: request.title,
                created_by: request.created_by,
                created_at: self.clock.utc(),
            })
            .await?;
        self.thread_detail(thread).await
    }

    async fn update_thread(&self, request: UpdateThreadRequest) -> Result<(), Error> {
        let mut thread = self.find_thread(request.id).await?;
        ensure_owner(
            thread.created_by,
            request.caller,
            "You are not authorized to update this thread",
        )?;
        let title = required("title", request.title)?;
        ensure_max_chars("title", &title, THREAD_TITLE_MAX_CHARS)?;

        if let Some(capsule) = request.capsule {
            self.require_capsule(capsule).await?;
            thread.capsule = capsule;
        }
        thread.title = title;

        let updated = self.threads.update(&thread).await.map_err(|err| {
            error!(thread_id = %thread.id, error = %err, "error updating discussion thread");
            Error::from(err)
        })?;
        if updated {
            Ok(())
        } else {
            Err(thread_not_found())
        }
    }

    async fn delete_thread(&self, id: ThreadId, caller: ProfileId) -> Result<(), Error> {
        let thread = self.find_thread(id).await?;
        ensure_owner(
            thread.created_by,
            caller,
            "You are not authorized to delete this thread",
        )?;
        if self.threads.delete(id).await? {
            Ok(())
        } else {
            Err(thread_not_found())
        }
    }

    async fn list_comments(&self, filter: CommentFilter) -> Result<Vec<CommentDetail>, Error> {
        let rows = self.comments.list(&filter).await?;
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.comment_detail(row).await?);
        }
        Ok(details)
    }

    async fn get_comment(&self, id: CommentId) -> Result<CommentDetail, Error> {
        let comment = self.find_comment(id).await?;
        self.comment_detail(comment).await
    }

    async fn create_comment(
        &self,
        request: CreateCommentRequest,
    ) -> Result<CommentDetail, Error> {
        let thread = self
            .threads
            .find(request.thread)
            .await?
            .ok_or_else(|| Error::not_found(INVALID_THREAD))?;

        let comment = self
            .comments
            .insert(&NewDiscussionComment {
                thread: request.thread,
                content: request.content,
                author: request.author,
                created_at: self.clock.utc(),
            })
            .await?;
        let author = self.stored_profile(comment.author).await?;
        Ok(CommentDetail {
            comment,
            thread,
            author,
        })
    }

    async fn update_comment(&self, request: UpdateCommentRequest) -> Result<(), Error> {
        let mut comment = self.find_comment(request.id).await?;
        ensure_owner(
            comment.author,
            request.caller,
            "You are not authorized to update this comment",
        )?;
        let content = required("content", request.content)?;

        if let Some(thread) = request.thread {
            if self.threads.find(thread).await?.is_none() {
                return Err(Error::not_found(INVALID_THREAD));
            }
            comment.thread = thread;
        }
        comment.content = content;

        let updated = self.comments.update(&comment).await.map_err(|err| {
            error!(comment_id = %comment.id, error = %err, "error updating discussion comment");
            Error::from(err)
        })?;
        if updated {
            Ok(())
        } else {
            Err(comment_not_found())
        }
    }

    async fn delete_comment(&self, id: CommentId, caller: ProfileId) -> Result<(), Error> {
        let comment = self.find_comment(id).await?;
        ensure_owner(
            comment.author,
            caller,
            "You are not authorized to delete this comment",
        )?;
        if self.comments.delete(id).await? {
            Ok(())
        } else {
            Err(comment_not_found())
        }
    }
}

#[cfg(test)]
#[path = "discussion_service_tests.rs"]
mod tests;
