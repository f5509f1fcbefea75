//! Integration tests for the Diesel discussion repositories.
//!
//! Threads list newest first and comments oldest first; equal timestamps fall
//! back to the id in the same direction.

#[path = "support/database.rs"]
mod database_support;

use rstest::rstest;
use timecapsule::domain::ports::{DiscussionCommentRepository, DiscussionThreadRepository};
use timecapsule::domain::{CommentFilter, NewDiscussionComment, NewDiscussionThread, ThreadFilter};
use timecapsule::outbound::persistence::{
    DieselDiscussionCommentRepository, DieselDiscussionThreadRepository,
};

use database_support::{TestDatabase, at, database, seed_capsule, seed_profile, skip};

#[rstest]
fn threads_newest_first_comments_oldest_first(database: Option<TestDatabase>) {
    let Some(db) = database else {
        skip("threads_newest_first_comments_oldest_first");
        return;
    };
    let threads = DieselDiscussionThreadRepository::new(db.pool.clone());
    let comments = DieselDiscussionCommentRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let author = seed_profile(&db.pool).await;
        let capsule = seed_capsule(&db.pool, &author, at(0)).await;

        let mut opened = Vec::new();
        for (minute, title) in [(5, "older"), (9, "tied a"), (9, "tied b")] {
            let thread = threads
                .insert(&NewDiscussionThread {
                    capsule: capsule.id,
                    title: title.to_owned(),
                    created_by: author.id,
                    created_at: at(minute),
                })
                .await
                .expect("insert thread");
            opened.push(thread.id);
        }
        let filter = ThreadFilter {
            capsule: Some(capsule.id),
            created_by: None,
        };
        let listed: Vec<_> = threads
            .list(&filter)
            .await
            .expect("list threads")
            .into_iter()
            .map(|thread| thread.id)
            .collect();
        assert_eq!(listed, vec![opened[2], opened[1], opened[0]]);
        assert_eq!(threads.count(&filter).await.expect("count threads"), 3);

        let thread = opened[0];
        let mut written = Vec::new();
        for (minute, text) in [(12, "later"), (11, "tied a"), (11, "tied b")] {
            let comment = comments
                .insert(&NewDiscussionComment {
                    thread,
                    content: text.to_owned(),
                    author: author.id,
                    created_at: at(minute),
                })
                .await
                .expect("insert comment");
            written.push(comment.id);
        }
        let comment_filter = CommentFilter {
            thread: Some(thread),
            author: None,
        };
        let listed: Vec<_> = comments
            .list(&comment_filter)
            .await
            .expect("list comments")
            .into_iter()
            .map(|comment| comment.id)
            .collect();
        assert_eq!(listed, vec![written[1], written[2], written[0]]);
        assert_eq!(
            comments.count(&comment_filter).await.expect("count comments"),
            3
        );
    });
}

#[rstest]
fn deleting_a_thread_removes_its_comments(database: Option<TestDatabase>) {
    let Some(db) = database else {
        skip("deleting_a_thread_removes_its_comments");
        return;
    };
    let threads = DieselDiscussionThreadRepository::new(db.pool.clone());
    let comments = DieselDiscussionCommentRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let author = seed_profile(&db.pool).await;
        let capsule = seed_capsule(&db.pool, &author, at(0)).await;
        let mut thread = threads
            .insert(&NewDiscussionThread {
                capsule: capsule.id,
                title: "opening day".to_owned(),
                created_by: author.id,
                created_at: at(1),
            })
            .await
            .expect("insert thread");
        let comment = comments
            .insert(&NewDiscussionComment {
                thread: thread.id,
                content: "next June".to_owned(),
                author: author.id,
                created_at: at(2),
            })
            .await
            .expect("insert comment");

        thread.title = "opening night".to_owned();
        assert!(threads.update(&thread).await.expect("update thread"));
        let stored = threads
            .find(thread.id)
            .await
            .expect("find thread")
            .expect("thread exists");
        assert_eq!(stored.title, "opening night");

        assert!(threads.delete(thread.id).await.expect("delete thread"));
        let orphan = comments.find(comment.id).await.expect("find comment");
        assert!(orphan.is_none());
        assert!(!comments.update(&comment).await.expect("update after delete"));
    });
}
