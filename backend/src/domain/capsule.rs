//! Time capsules and the content attached to them.

use chrono::{DateTime, Utc};

use super::{CapsuleContentId, CapsuleId, Lookup, LookupId, ProfileId};

/// Longest capsule title the schema accepts.
pub const CAPSULE_TITLE_MAX_CHARS: usize = 255;
/// Longest media URL the schema accepts.
pub const MEDIA_URL_MAX_CHARS: usize = 255;

/// A user-created capsule with a scheduled opening date.
///
/// The opening date may lie in the past; nothing enforces a future date.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeCapsule {
    /// Row key.
    pub id: CapsuleId,
    /// Profile that created the capsule.
    pub creator: ProfileId,
    /// Capsule status lookup.
    pub status: LookupId,
    /// Capsule type lookup.
    pub capsule_type: LookupId,
    /// Short title.
    pub title: String,
    /// Long-form description.
    pub descriptions: String,
    /// When the capsule is meant to be opened.
    pub opening_date: DateTime<Utc>,
    /// Horizontal coordinate.
    pub location_x: f64,
    /// Vertical coordinate.
    pub location_y: f64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a capsule.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCapsule {
    /// Profile that created the capsule.
    pub creator: ProfileId,
    /// Capsule status lookup.
    pub status: LookupId,
    /// Capsule type lookup.
    pub capsule_type: LookupId,
    /// Short title.
    pub title: String,
    /// Long-form description.
    pub descriptions: String,
    /// When the capsule is meant to be opened.
    pub opening_date: DateTime<Utc>,
    /// Horizontal coordinate.
    pub location_x: f64,
    /// Vertical coordinate.
    pub location_y: f64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NewCapsule {
    /// Materialise the stored row once the key is known.
    #[must_use]
    pub fn into_capsule(self, id: CapsuleId) -> TimeCapsule {
        TimeCapsule {
            id,
            creator: self.creator,
            status: self.status,
            capsule_type: self.capsule_type,
            title: self.title,
            descriptions: self.descriptions,
            opening_date: self.opening_date,
            location_x: self.location_x,
            location_y: self.location_y,
            created_at: self.created_at,
        }
    }
}

/// A piece of content stored inside a capsule.
#[derive(Debug, Clone, PartialEq)]
pub struct CapsuleContent {
    /// Row key.
    pub id: CapsuleContentId,
    /// Owning capsule.
    pub capsule: CapsuleId,
    /// Content type lookup.
    pub content_type: LookupId,
    /// Inline content body.
    pub content: String,
    /// Optional external media reference; not validated.
    pub media_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for capsule content.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCapsuleContent {
    /// Owning capsule.
    pub capsule: CapsuleId,
    /// Content type lookup.
    pub content_type: LookupId,
    /// Inline content body.
    pub content: String,
    /// Optional external media reference.
    pub media_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NewCapsuleContent {
    /// Materialise the stored row once the key is known.
    #[must_use]
    pub fn into_content(self, id: CapsuleContentId) -> CapsuleContent {
        CapsuleContent {
            id,
            capsule: self.capsule,
            content_type: self.content_type,
            content: self.content,
            media_url: self.media_url,
            created_at: self.created_at,
        }
    }
}

/// List filter for capsule content. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapsuleContentFilter {
    /// Only content in this capsule.
    pub capsule: Option<CapsuleId>,
    /// Only content of this type.
    pub content_type: Option<LookupId>,
}

impl CapsuleContentFilter {
    /// Whether `content` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, content: &CapsuleContent) -> bool {
        self.capsule.is_none_or(|id| content.capsule == id)
            && self.content_type.is_none_or(|id| content.content_type == id)
    }
}

/// Capsule content with its foreign keys expanded one level.
#[derive(Debug, Clone, PartialEq)]
pub struct CapsuleContentDetail {
    /// The content row.
    pub content: CapsuleContent,
    /// Owning capsule.
    pub capsule: TimeCapsule,
    /// Content type row.
    pub content_type: Lookup,
}
