//! Shared fixtures for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    AccountId, CapsuleContent, CapsuleContentId, CapsuleId, CommentId, DiscussionComment,
    DiscussionThread, Lookup, LookupId, Prediction, PredictionId, ProfileId, StoryChoice,
    StoryChoiceId, StoryNode, StoryNodeId, ThreadId, TimeCapsule, UserProfile,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn lookup(id: i64, name: &str) -> Lookup {
    Lookup::new(LookupId::new(id), name)
}

pub(crate) fn profile(id: i64) -> UserProfile {
    UserProfile {
        id: ProfileId::new(id),
        account_id: AccountId::new(id),
        bio: String::new(),
        location_x: 0.0,
        location_y: 0.0,
    }
}

pub(crate) fn capsule(id: i64, creator: i64) -> TimeCapsule {
    TimeCapsule {
        id: CapsuleId::new(id),
        creator: ProfileId::new(creator),
        status: LookupId::new(1),
        capsule_type: LookupId::new(1),
        title: format!("capsule {id}"),
        descriptions: "sealed letters".to_owned(),
        opening_date: fixture_timestamp(),
        location_x: 1.5,
        location_y: -2.5,
        created_at: fixture_timestamp(),
    }
}

pub(crate) fn content(id: i64, capsule: i64) -> CapsuleContent {
    CapsuleContent {
        id: CapsuleContentId::new(id),
        capsule: CapsuleId::new(capsule),
        content_type: LookupId::new(1),
        content: "hello future".to_owned(),
        media_url: None,
        created_at: fixture_timestamp(),
    }
}

pub(crate) fn node(id: i64, parent: Option<i64>) -> StoryNode {
    StoryNode {
        id: StoryNodeId::new(id),
        capsule_content: CapsuleContentId::new(1),
        parent_node: parent.map(StoryNodeId::new),
        content: format!("passage {id}"),
        created_at: fixture_timestamp(),
    }
}

pub(crate) fn choice(id: i64, node: i64, next_node: i64) -> StoryChoice {
    StoryChoice {
        id: StoryChoiceId::new(id),
        node: StoryNodeId::new(node),
        choice_text: format!("choice {id}"),
        next_node: StoryNodeId::new(next_node),
        created_at: fixture_timestamp(),
    }
}

pub(crate) fn prediction(id: i64, status: i64) -> Prediction {
    Prediction {
        id: PredictionId::new(id),
        capsule_content: CapsuleContentId::new(1),
        prediction_text: "flying cars".to_owned(),
        category: None,
        verification_status: LookupId::new(status),
        verification_date: None,
        verification_user: None,
        created_at: fixture_timestamp(),
    }
}

pub(crate) fn thread(id: i64, created_by: i64) -> DiscussionThread {
    DiscussionThread {
        id: ThreadId::new(id),
        capsule: CapsuleId::new(1),
        title: format!("thread {id}"),
        created_by: ProfileId::new(created_by),
        created_at: fixture_timestamp(),
    }
}

pub(crate) fn comment(id: i64, author: i64) -> DiscussionComment {
    DiscussionComment {
        id: CommentId::new(id),
        thread: ThreadId::new(1),
        content: format!("comment {id}"),
        author: ProfileId::new(author),
        created_at: fixture_timestamp(),
    }
}
