//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities for capsules and everything
//! attached to them, the ports adapters implement, and the services that
//! enforce reference checks and authorship. Types here carry no serde
//! derives beyond ids and the error payload; inbound adapters own the JSON
//! shapes.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Row types (`TimeCapsule`, `Prediction`, ...) with their `New*` insert
//!   payloads, list filters, and `*Detail` expansions.
//! - Services (`Capsules`, `Predictions`, ...) implementing the driving ports
//!   in [`ports`].

pub mod ports;

mod account_service;
mod auth;
mod capsule;
mod capsule_service;
mod discussion;
mod discussion_service;
mod error;
mod ids;
mod lookup;
mod lookup_service;
mod prediction;
mod prediction_service;
mod profile;
mod service_support;
#[cfg(test)]
mod service_test_helpers;
mod story;
mod story_service;
mod timeline;
mod timeline_service;
mod trace_id;

pub use self::account_service::Accounts;
pub use self::auth::{
    AuthToken, CredentialsValidationError, LoginCredentials, PasswordHashError, Registration,
    USERNAME_MAX_CHARS, hash_password, verify_password,
};
pub use self::capsule::{
    CAPSULE_TITLE_MAX_CHARS, CapsuleContent, CapsuleContentDetail, CapsuleContentFilter,
    MEDIA_URL_MAX_CHARS, NewCapsule, NewCapsuleContent, TimeCapsule,
};
pub use self::capsule_service::{CapsuleContents, Capsules};
pub use self::discussion::{
    CommentDetail, CommentFilter, DiscussionComment, DiscussionThread, NewDiscussionComment,
    NewDiscussionThread, THREAD_TITLE_MAX_CHARS, ThreadDetail, ThreadFilter,
};
pub use self::discussion_service::Discussions;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{
    AccountId, CapsuleContentId, CapsuleId, CommentId, LookupId, PredictionId, ProfileId,
    StoryChoiceId, StoryNodeId, ThreadId,
};
pub use self::lookup::{DISPROVED, Lookup, LookupKind, PENDING_VERIFICATION, VERIFIED};
pub use self::lookup_service::Lookups;
pub use self::prediction::{
    AccuracyStats, CATEGORY_MAX_CHARS, NewPrediction, Prediction, PredictionDetail,
    PredictionFilter, PredictionStatistics,
};
pub use self::prediction_service::Predictions;
pub use self::profile::{NewAccount, StoredCredentials, UserProfile};
pub use self::story::{
    NewStoryChoice, NewStoryNode, StoryChoice, StoryChoiceDetail, StoryChoiceFilter, StoryNode,
    StoryNodeDetail, StoryNodeFilter,
};
pub use self::story_service::Stories;
pub use self::timeline::{
    Achievement, AchievementInputs, TimelineEntry, TimelineStatistics, achievements,
};
pub use self::timeline_service::Timeline;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use timecapsule::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
