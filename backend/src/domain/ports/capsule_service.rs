//! Driving ports for capsule and capsule content use-cases.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    CapsuleContentDetail, CapsuleContentFilter, CapsuleContentId, CapsuleId, Error, LookupId,
    ProfileId, TimeCapsule,
};

/// Fields accepted when creating a capsule.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCapsuleRequest {
    /// Authenticated caller, recorded as creator.
    pub creator: ProfileId,
    /// Capsule status lookup id.
    pub status: LookupId,
    /// Capsule type lookup id.
    pub capsule_type: LookupId,
    /// Short title.
    pub title: String,
    /// Long-form description.
    pub descriptions: String,
    /// Scheduled opening.
    pub opening_date: DateTime<Utc>,
    /// Horizontal coordinate.
    pub location_x: f64,
    /// Vertical coordinate.
    pub location_y: f64,
}

/// Full overwrite of a capsule; lookups change only when supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCapsuleRequest {
    /// Capsule to overwrite.
    pub id: CapsuleId,
    /// Replacement status, if any.
    pub status: Option<LookupId>,
    /// Replacement type, if any.
    pub capsule_type: Option<LookupId>,
    /// Short title; required.
    pub title: Option<String>,
    /// Long-form description; required.
    pub descriptions: Option<String>,
    /// Scheduled opening; required.
    pub opening_date: Option<DateTime<Utc>>,
    /// Horizontal coordinate; required.
    pub location_x: Option<f64>,
    /// Vertical coordinate; required.
    pub location_y: Option<f64>,
}

/// Domain use-case port for capsules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapsuleService: Send + Sync {
    /// Every capsule, ordered by id.
    async fn list(&self) -> Result<Vec<TimeCapsule>, Error>;

    /// Fetch one capsule.
    async fn get(&self, id: CapsuleId) -> Result<TimeCapsule, Error>;

    /// Create a capsule owned by the caller.
    async fn create(&self, request: CreateCapsuleRequest) -> Result<TimeCapsule, Error>;

    /// Overwrite a capsule.
    async fn update(&self, request: UpdateCapsuleRequest) -> Result<(), Error>;

    /// Delete a capsule and everything attached to it.
    async fn delete(&self, id: CapsuleId) -> Result<(), Error>;
}

/// Fields accepted when creating capsule content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCapsuleContentRequest {
    /// Owning capsule.
    pub capsule: CapsuleId,
    /// Content type lookup id.
    pub content_type: LookupId,
    /// Inline body.
    pub content: String,
    /// External media reference.
    pub media_url: Option<String>,
}

/// Overwrite of capsule content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCapsuleContentRequest {
    /// Content to overwrite.
    pub id: CapsuleContentId,
    /// Replacement capsule, if any.
    pub capsule: Option<CapsuleId>,
    /// Replacement content type, if any.
    pub content_type: Option<LookupId>,
    /// Inline body; required, checked once the row is found.
    pub content: Option<String>,
    /// `None` keeps the stored URL; `Some(None)` clears it.
    pub media_url: Option<Option<String>>,
}

/// Domain use-case port for capsule content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapsuleContentService: Send + Sync {
    /// Content matching `filter`, ordered by id.
    async fn list(&self, filter: CapsuleContentFilter)
    -> Result<Vec<CapsuleContentDetail>, Error>;

    /// Fetch one content row.
    async fn get(&self, id: CapsuleContentId) -> Result<CapsuleContentDetail, Error>;

    /// Attach content to a capsule.
    async fn create(
        &self,
        request: CreateCapsuleContentRequest,
    ) -> Result<CapsuleContentDetail, Error>;

    /// Overwrite content.
    async fn update(&self, request: UpdateCapsuleContentRequest) -> Result<(), Error>;

    /// Delete content and its predictions and story nodes.
    async fn delete(&self, id: CapsuleContentId) -> Result<(), Error>;
}
