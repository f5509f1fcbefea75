//! Discussion threads on capsules and their comments.

use chrono::{DateTime, Utc};

use super::{CapsuleId, CommentId, ProfileId, ThreadId, TimeCapsule, UserProfile};

/// Longest thread title the schema accepts.
pub const THREAD_TITLE_MAX_CHARS: usize = 255;

/// A discussion opened on a capsule.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscussionThread {
    /// Row key.
    pub id: ThreadId,
    /// Capsule under discussion.
    pub capsule: CapsuleId,
    /// Thread title.
    pub title: String,
    /// Profile that opened the thread; the only one allowed to change it.
    pub created_by: ProfileId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a thread.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscussionThread {
    /// Capsule under discussion.
    pub capsule: CapsuleId,
    /// Thread title.
    pub title: String,
    /// Profile opening the thread.
    pub created_by: ProfileId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NewDiscussionThread {
    /// Materialise the stored row once the key is known.
    #[must_use]
    pub fn into_thread(self, id: ThreadId) -> DiscussionThread {
        DiscussionThread {
            id,
            capsule: self.capsule,
            title: self.title,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

/// List filter for threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadFilter {
    /// Only threads on this capsule.
    pub capsule: Option<CapsuleId>,
    /// Only threads opened by this profile.
    pub created_by: Option<ProfileId>,
}

impl ThreadFilter {
    /// Whether `thread` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, thread: &DiscussionThread) -> bool {
        self.capsule.is_none_or(|id| thread.capsule == id)
            && self.created_by.is_none_or(|id| thread.created_by == id)
    }
}

/// Thread with its foreign keys expanded and its comment count attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadDetail {
    /// The thread row.
    pub thread: DiscussionThread,
    /// Capsule under discussion.
    pub capsule: TimeCapsule,
    /// Profile that opened the thread.
    pub created_by: UserProfile,
    /// Number of comments posted to the thread.
    pub comment_count: u64,
}

/// A comment posted to a thread.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscussionComment {
    /// Row key.
    pub id: CommentId,
    /// Thread the comment belongs to.
    pub thread: ThreadId,
    /// Comment body.
    pub content: String,
    /// Profile that wrote the comment; the only one allowed to change it.
    pub author: ProfileId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a comment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscussionComment {
    /// Thread the comment belongs to.
    pub thread: ThreadId,
    /// Comment body.
    pub content: String,
    /// Profile writing the comment.
    pub author: ProfileId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NewDiscussionComment {
    /// Materialise the stored row once the key is known.
    #[must_use]
    pub fn into_comment(self, id: CommentId) -> DiscussionComment {
        DiscussionComment {
            id,
            thread: self.thread,
            content: self.content,
            author: self.author,
            created_at: self.created_at,
        }
    }
}

/// List filter for comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentFilter {
    /// Only comments in this thread.
    pub thread: Option<ThreadId>,
    /// Only comments by this profile.
    pub author: Option<ProfileId>,
}

impl CommentFilter {
    /// Whether `comment` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, comment: &DiscussionComment) -> bool {
        self.thread.is_none_or(|id| comment.thread == id)
            && self.author.is_none_or(|id| comment.author == id)
    }
}

/// Comment with its foreign keys expanded one level.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentDetail {
    /// The comment row.
    pub comment: DiscussionComment,
    /// Thread the comment belongs to.
    pub thread: DiscussionThread,
    /// Profile that wrote the comment.
    pub author: UserProfile,
}
