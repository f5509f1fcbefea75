//! JSON projections and OpenAPI schema definitions.
//!
//! Domain types remain framework-agnostic by not deriving `Serialize` or
//! `ToSchema`. The bodies below are the wire shapes clients see; nested
//! bodies carry every column of the referenced row with its own foreign keys
//! left as plain ids.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    CapsuleContent, DiscussionThread, Lookup, StoryNode, TimeCapsule, UserProfile,
};

/// Render a timestamp as RFC 3339 in UTC.
pub(crate) fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The resource, or one it references, does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// Persistence is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable reason returned to clients.
    #[schema(example = "Invalid capsule id sent")]
    reason: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field.
    details: Option<serde_json::Value>,
}

/// Lookup row (`{id, name}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LookupBody {
    pub id: i64,
    #[schema(example = "sealed")]
    pub name: String,
}

impl From<Lookup> for LookupBody {
    fn from(value: Lookup) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
        }
    }
}

/// Flat capsule projection used by the capsule resource.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CapsuleBody {
    pub id: i64,
    pub status: i64,
    #[serde(rename = "type")]
    pub capsule_type: i64,
    pub title: String,
    pub descriptions: String,
    #[schema(format = "date-time")]
    pub opening_date: String,
    pub location_x: f64,
    pub location_y: f64,
}

impl From<TimeCapsule> for CapsuleBody {
    fn from(value: TimeCapsule) -> Self {
        Self {
            id: value.id.get(),
            status: value.status.get(),
            capsule_type: value.capsule_type.get(),
            title: value.title,
            descriptions: value.descriptions,
            opening_date: timestamp(value.opening_date),
            location_x: value.location_x,
            location_y: value.location_y,
        }
    }
}

/// Capsule expanded inside another projection.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NestedCapsuleBody {
    pub id: i64,
    pub creator: i64,
    pub status: i64,
    #[serde(rename = "type")]
    pub capsule_type: i64,
    pub title: String,
    pub descriptions: String,
    #[schema(format = "date-time")]
    pub opening_date: String,
    pub location_x: f64,
    pub location_y: f64,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<TimeCapsule> for NestedCapsuleBody {
    fn from(value: TimeCapsule) -> Self {
        Self {
            id: value.id.get(),
            creator: value.creator.get(),
            status: value.status.get(),
            capsule_type: value.capsule_type.get(),
            title: value.title,
            descriptions: value.descriptions,
            opening_date: timestamp(value.opening_date),
            location_x: value.location_x,
            location_y: value.location_y,
            created_at: timestamp(value.created_at),
        }
    }
}

/// Capsule content expanded inside another projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NestedContentBody {
    pub id: i64,
    pub capsule: i64,
    pub content_type: i64,
    pub content: String,
    pub media_url: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<CapsuleContent> for NestedContentBody {
    fn from(value: CapsuleContent) -> Self {
        Self {
            id: value.id.get(),
            capsule: value.capsule.get(),
            content_type: value.content_type.get(),
            content: value.content,
            media_url: value.media_url,
            created_at: timestamp(value.created_at),
        }
    }
}

/// Story node expanded inside another projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NestedNodeBody {
    pub id: i64,
    pub capsule_content: i64,
    pub parent_node: Option<i64>,
    pub content: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<StoryNode> for NestedNodeBody {
    fn from(value: StoryNode) -> Self {
        Self {
            id: value.id.get(),
            capsule_content: value.capsule_content.get(),
            parent_node: value.parent_node.map(|id| id.get()),
            content: value.content,
            created_at: timestamp(value.created_at),
        }
    }
}

/// Discussion thread expanded inside another projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NestedThreadBody {
    pub id: i64,
    pub capsule: i64,
    pub title: String,
    pub created_by: i64,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<DiscussionThread> for NestedThreadBody {
    fn from(value: DiscussionThread) -> Self {
        Self {
            id: value.id.get(),
            capsule: value.capsule.get(),
            title: value.title,
            created_by: value.created_by.get(),
            created_at: timestamp(value.created_at),
        }
    }
}

/// User profile expanded inside another projection. `user` is the account id.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfileBody {
    pub id: i64,
    pub user: i64,
    pub bio: String,
    pub location_x: f64,
    pub location_y: f64,
}

impl From<UserProfile> for ProfileBody {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.id.get(),
            user: value.account_id.get(),
            bio: value.bio,
            location_x: value.location_x,
            location_y: value.location_y,
        }
    }
}
