//! Diesel row structs and their conversions to domain rows.
//!
//! Nothing here leaves the persistence module. Insert structs borrow from the
//! domain payload; changesets overwrite every mutable column, writing `NULL`
//! for `None`.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    AccountId, CapsuleContent, CapsuleContentId, CapsuleId, CommentId, DiscussionComment,
    DiscussionThread, LookupId, NewCapsule, NewCapsuleContent, NewDiscussionComment,
    NewDiscussionThread, NewPrediction, NewStoryChoice, NewStoryNode, Prediction, PredictionId,
    ProfileId, StoryChoice, StoryChoiceId, StoryNode, StoryNodeId, ThreadId, TimeCapsule,
    UserProfile,
};

use super::schema::{
    accounts, auth_tokens, capsule_contents, discussion_comments, discussion_threads, predictions,
    story_choices, story_nodes, time_capsules, user_profiles,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialsRow {
    pub id: i64,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: i64,
    pub account_id: i64,
    pub bio: String,
    pub location_x: f64,
    pub location_y: f64,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: ProfileId::new(row.id),
            account_id: AccountId::new(row.account_id),
            bio: row.bio,
            location_x: row.location_x,
            location_y: row.location_y,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub account_id: i64,
    pub bio: &'a str,
    pub location_x: f64,
    pub location_y: f64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = auth_tokens)]
pub(crate) struct NewTokenRow<'a> {
    pub key: &'a str,
    pub account_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = time_capsules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CapsuleRow {
    pub id: i64,
    pub creator_id: i64,
    pub status_id: i64,
    pub type_id: i64,
    pub title: String,
    pub descriptions: String,
    pub opening_date: DateTime<Utc>,
    pub location_x: f64,
    pub location_y: f64,
    pub created_at: DateTime<Utc>,
}

impl From<CapsuleRow> for TimeCapsule {
    fn from(row: CapsuleRow) -> Self {
        Self {
            id: CapsuleId::new(row.id),
            creator: ProfileId::new(row.creator_id),
            status: LookupId::new(row.status_id),
            capsule_type: LookupId::new(row.type_id),
            title: row.title,
            descriptions: row.descriptions,
            opening_date: row.opening_date,
            location_x: row.location_x,
            location_y: row.location_y,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = time_capsules)]
pub(crate) struct NewCapsuleRow<'a> {
    pub creator_id: i64,
    pub status_id: i64,
    pub type_id: i64,
    pub title: &'a str,
    pub descriptions: &'a str,
    pub opening_date: DateTime<Utc>,
    pub location_x: f64,
    pub location_y: f64,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewCapsule> for NewCapsuleRow<'a> {
    fn from(capsule: &'a NewCapsule) -> Self {
        Self {
            creator_id: capsule.creator.get(),
            status_id: capsule.status.get(),
            type_id: capsule.capsule_type.get(),
            title: &capsule.title,
            descriptions: &capsule.descriptions,
            opening_date: capsule.opening_date,
            location_x: capsule.location_x,
            location_y: capsule.location_y,
            created_at: capsule.created_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = time_capsules)]
pub(crate) struct CapsuleChanges<'a> {
    pub creator_id: i64,
    pub status_id: i64,
    pub type_id: i64,
    pub title: &'a str,
    pub descriptions: &'a str,
    pub opening_date: DateTime<Utc>,
    pub location_x: f64,
    pub location_y: f64,
}

impl<'a> From<&'a TimeCapsule> for CapsuleChanges<'a> {
    fn from(capsule: &'a TimeCapsule) -> Self {
        Self {
            creator_id: capsule.creator.get(),
            status_id: capsule.status.get(),
            type_id: capsule.capsule_type.get(),
            title: &capsule.title,
            descriptions: &capsule.descriptions,
            opening_date: capsule.opening_date,
            location_x: capsule.location_x,
            location_y: capsule.location_y,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = capsule_contents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentRow {
    pub id: i64,
    pub capsule_id: i64,
    pub content_type_id: i64,
    pub content: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ContentRow> for CapsuleContent {
    fn from(row: ContentRow) -> Self {
        Self {
            id: CapsuleContentId::new(row.id),
            capsule: CapsuleId::new(row.capsule_id),
            content_type: LookupId::new(row.content_type_id),
            content: row.content,
            media_url: row.media_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = capsule_contents)]
pub(crate) struct NewContentRow<'a> {
    pub capsule_id: i64,
    pub content_type_id: i64,
    pub content: &'a str,
    pub media_url: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewCapsuleContent> for NewContentRow<'a> {
    fn from(content: &'a NewCapsuleContent) -> Self {
        Self {
            capsule_id: content.capsule.get(),
            content_type_id: content.content_type.get(),
            content: &content.content,
            media_url: content.media_url.as_deref(),
            created_at: content.created_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = capsule_contents, treat_none_as_null = true)]
pub(crate) struct ContentChanges<'a> {
    pub capsule_id: i64,
    pub content_type_id: i64,
    pub content: &'a str,
    pub media_url: Option<&'a str>,
}

impl<'a> From<&'a CapsuleContent> for ContentChanges<'a> {
    fn from(content: &'a CapsuleContent) -> Self {
        Self {
            capsule_id: content.capsule.get(),
            content_type_id: content.content_type.get(),
            content: &content.content,
            media_url: content.media_url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = predictions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PredictionRow {
    pub id: i64,
    pub capsule_content_id: i64,
    pub prediction_text: String,
    pub category: Option<String>,
    pub verification_status_id: i64,
    pub verification_date: Option<DateTime<Utc>>,
    pub verification_user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<PredictionRow> for Prediction {
    fn from(row: PredictionRow) -> Self {
        Self {
            id: PredictionId::new(row.id),
            capsule_content: CapsuleContentId::new(row.capsule_content_id),
            prediction_text: row.prediction_text,
            category: row.category,
            verification_status: LookupId::new(row.verification_status_id),
            verification_date: row.verification_date,
            verification_user: row.verification_user_id.map(ProfileId::new),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = predictions)]
pub(crate) struct NewPredictionRow<'a> {
    pub capsule_content_id: i64,
    pub prediction_text: &'a str,
    pub category: Option<&'a str>,
    pub verification_status_id: i64,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewPrediction> for NewPredictionRow<'a> {
    fn from(prediction: &'a NewPrediction) -> Self {
        Self {
            capsule_content_id: prediction.capsule_content.get(),
            prediction_text: &prediction.prediction_text,
            category: prediction.category.as_deref(),
            verification_status_id: prediction.verification_status.get(),
            created_at: prediction.created_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = predictions, treat_none_as_null = true)]
pub(crate) struct PredictionChanges<'a> {
    pub capsule_content_id: i64,
    pub prediction_text: &'a str,
    pub category: Option<&'a str>,
    pub verification_status_id: i64,
    pub verification_date: Option<DateTime<Utc>>,
    pub verification_user_id: Option<i64>,
}

impl<'a> From<&'a Prediction> for PredictionChanges<'a> {
    fn from(prediction: &'a Prediction) -> Self {
        Self {
            capsule_content_id: prediction.capsule_content.get(),
            prediction_text: &prediction.prediction_text,
            category: prediction.category.as_deref(),
            verification_status_id: prediction.verification_status.get(),
            verification_date: prediction.verification_date,
            verification_user_id: prediction.verification_user.map(ProfileId::get),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = story_nodes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StoryNodeRow {
    pub id: i64,
    pub capsule_content_id: i64,
    pub parent_node_id: Option<i64>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoryNodeRow> for StoryNode {
    fn from(row: StoryNodeRow) -> Self {
        Self {
            id: StoryNodeId::new(row.id),
            capsule_content: CapsuleContentId::new(row.capsule_content_id),
            parent_node: row.parent_node_id.map(StoryNodeId::new),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = story_nodes)]
pub(crate) struct NewStoryNodeRow<'a> {
    pub capsule_content_id: i64,
    pub parent_node_id: Option<i64>,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewStoryNode> for NewStoryNodeRow<'a> {
    fn from(node: &'a NewStoryNode) -> Self {
        Self {
            capsule_content_id: node.capsule_content.get(),
            parent_node_id: node.parent_node.map(StoryNodeId::get),
            content: &node.content,
            created_at: node.created_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = story_nodes, treat_none_as_null = true)]
pub(crate) struct StoryNodeChanges<'a> {
    pub capsule_content_id: i64,
    pub parent_node_id: Option<i64>,
    pub content: &'a str,
}

impl<'a> From<&'a StoryNode> for StoryNodeChanges<'a> {
    fn from(node: &'a StoryNode) -> Self {
        Self {
            capsule_content_id: node.capsule_content.get(),
            parent_node_id: node.parent_node.map(StoryNodeId::get),
            content: &node.content,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = story_choices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StoryChoiceRow {
    pub id: i64,
    pub node_id: i64,
    pub choice_text: String,
    pub next_node_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<StoryChoiceRow> for StoryChoice {
    fn from(row: StoryChoiceRow) -> Self {
        Self {
            id: StoryChoiceId::new(row.id),
            node: StoryNodeId::new(row.node_id),
            choice_text: row.choice_text,
            next_node: StoryNodeId::new(row.next_node_id),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = story_choices)]
pub(crate) struct NewStoryChoiceRow<'a> {
    pub node_id: i64,
    pub choice_text: &'a str,
    pub next_node_id: i64,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewStoryChoice> for NewStoryChoiceRow<'a> {
    fn from(choice: &'a NewStoryChoice) -> Self {
        Self {
            node_id: choice.node.get(),
            choice_text: &choice.choice_text,
            next_node_id: choice.next_node.get(),
            created_at: choice.created_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = story_choices)]
pub(crate) struct StoryChoiceChanges<'a> {
    pub node_id: i64,
    pub choice_text: &'a str,
    pub next_node_id: i64,
}

impl<'a> From<&'a StoryChoice> for StoryChoiceChanges<'a> {
    fn from(choice: &'a StoryChoice) -> Self {
        Self {
            node_id: choice.node.get(),
            choice_text: &choice.choice_text,
            next_node_id: choice.next_node.get(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = discussion_threads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ThreadRow {
    pub id: i64,
    pub capsule_id: i64,
    pub title: String,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ThreadRow> for DiscussionThread {
    fn from(row: ThreadRow) -> Self {
        Self {
            id: ThreadId::new(row.id),
            capsule: CapsuleId::new(row.capsule_id),
            title: row.title,
            created_by: ProfileId::new(row.created_by_id),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = discussion_threads)]
pub(crate) struct NewThreadRow<'a> {
    pub capsule_id: i64,
    pub title: &'a str,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewDiscussionThread> for NewThreadRow<'a> {
    fn from(thread: &'a NewDiscussionThread) -> Self {
        Self {
            capsule_id: thread.capsule.get(),
            title: &thread.title,
            created_by_id: thread.created_by.get(),
            created_at: thread.created_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = discussion_threads)]
pub(crate) struct ThreadChanges<'a> {
    pub capsule_id: i64,
    pub title: &'a str,
}

impl<'a> From<&'a DiscussionThread> for ThreadChanges<'a> {
    fn from(thread: &'a DiscussionThread) -> Self {
        Self {
            capsule_id: thread.capsule.get(),
            title: &thread.title,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = discussion_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub thread_id: i64,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for DiscussionComment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            thread: ThreadId::new(row.thread_id),
            content: row.content,
            author: ProfileId::new(row.author_id),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = discussion_comments)]
pub(crate) struct NewCommentRow<'a> {
    pub thread_id: i64,
    pub content: &'a str,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a NewDiscussionComment> for NewCommentRow<'a> {
    fn from(comment: &'a NewDiscussionComment) -> Self {
        Self {
            thread_id: comment.thread.get(),
            content: &comment.content,
            author_id: comment.author.get(),
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = discussion_comments)]
pub(crate) struct CommentChanges<'a> {
    pub thread_id: i64,
    pub content: &'a str,
}

impl<'a> From<&'a DiscussionComment> for CommentChanges<'a> {
    fn from(comment: &'a DiscussionComment) -> Self {
        Self {
            thread_id: comment.thread.get(),
            content: &comment.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2031, 1, 1, 9, 30, 0)
            .single()
            .expect("fixture timestamp")
    }

    #[rstest]
    fn capsule_rows_keep_every_column(stamp: DateTime<Utc>) {
        let capsule = TimeCapsule::from(CapsuleRow {
            id: 3,
            creator_id: 7,
            status_id: 1,
            type_id: 2,
            title: "letters".to_owned(),
            descriptions: "for later".to_owned(),
            opening_date: stamp,
            location_x: 51.5,
            location_y: -0.12,
            created_at: stamp,
        });

        assert_eq!(capsule.id, CapsuleId::new(3));
        assert_eq!(capsule.creator, ProfileId::new(7));
        assert_eq!(capsule.capsule_type, LookupId::new(2));

        let changes = CapsuleChanges::from(&capsule);
        assert_eq!(changes.type_id, 2);
        assert_eq!(changes.title, "letters");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(42), Some(ProfileId::new(42)))]
    fn prediction_verifier_is_optional(
        stamp: DateTime<Utc>,
        #[case] column: Option<i64>,
        #[case] expected: Option<ProfileId>,
    ) {
        let prediction = Prediction::from(PredictionRow {
            id: 4,
            capsule_content_id: 1,
            prediction_text: "flying cars".to_owned(),
            category: None,
            verification_status_id: 2,
            verification_date: column.map(|_| stamp),
            verification_user_id: column,
            created_at: stamp,
        });

        assert_eq!(prediction.verification_user, expected);
        let changes = PredictionChanges::from(&prediction);
        assert_eq!(changes.verification_user_id, column);
        assert_eq!(changes.category, None);
    }

    #[rstest]
    fn root_nodes_write_a_null_parent(stamp: DateTime<Utc>) {
        let mut node = StoryNode::from(StoryNodeRow {
            id: 2,
            capsule_content_id: 1,
            parent_node_id: Some(1),
            content: "the door creaks".to_owned(),
            created_at: stamp,
        });
        assert_eq!(node.parent_node, Some(StoryNodeId::new(1)));

        node.parent_node = None;
        let changes = StoryNodeChanges::from(&node);
        assert_eq!(changes.parent_node_id, None);
        assert_eq!(changes.capsule_content_id, 1);
    }

    #[rstest]
    fn cleared_media_url_becomes_null(stamp: DateTime<Utc>) {
        let mut content = CapsuleContent::from(ContentRow {
            id: 5,
            capsule_id: 2,
            content_type_id: 1,
            content: "hello".to_owned(),
            media_url: Some("https://example.test/a.png".to_owned()),
            created_at: stamp,
        });
        content.media_url = None;

        assert_eq!(ContentChanges::from(&content).media_url, None);
    }

    #[rstest]
    fn discussion_rows_map_authors(stamp: DateTime<Utc>) {
        let thread = DiscussionThread::from(ThreadRow {
            id: 1,
            capsule_id: 3,
            title: "opening day".to_owned(),
            created_by_id: 10,
            created_at: stamp,
        });
        let comment = DiscussionComment::from(CommentRow {
            id: 8,
            thread_id: 1,
            content: "next June".to_owned(),
            author_id: 20,
            created_at: stamp,
        });

        assert_eq!(thread.created_by, ProfileId::new(10));
        assert_eq!(comment.thread, thread.id);
        assert_eq!(comment.author, ProfileId::new(20));
        assert_eq!(ThreadChanges::from(&thread).capsule_id, 3);
        assert_eq!(CommentChanges::from(&comment).thread_id, 1);
    }

    #[rstest]
    fn insert_rows_borrow_from_domain_payloads(stamp: DateTime<Utc>) {
        let choice = NewStoryChoice {
            node: StoryNodeId::new(1),
            choice_text: "go left".to_owned(),
            next_node: StoryNodeId::new(2),
            created_at: stamp,
        };
        let row = NewStoryChoiceRow::from(&choice);
        assert_eq!((row.node_id, row.next_node_id), (1, 2));
        assert_eq!(row.choice_text, "go left");

        let profile = UserProfile::from(ProfileRow {
            id: 6,
            account_id: 5,
            bio: String::new(),
            location_x: 0.0,
            location_y: 0.0,
        });
        assert_eq!(profile.account_id, AccountId::new(5));
    }
}
