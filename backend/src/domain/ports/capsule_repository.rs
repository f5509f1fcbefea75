//! Port abstractions for capsules and their content.

use async_trait::async_trait;

use crate::domain::{
    CapsuleContent, CapsuleContentFilter, CapsuleContentId, CapsuleId, NewCapsule,
    NewCapsuleContent, ProfileId, TimeCapsule,
};

use super::{define_port_error, map_port_error};

define_port_error! {
    /// Errors raised by capsule and capsule content repository adapters.
    pub enum CapsuleRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "capsule repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "capsule repository query failed: {message}",
    }
}

map_port_error!(CapsuleRepositoryError, "capsule repository");

/// Persistence for time capsules.
///
/// Deleting a capsule removes every row that references it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapsuleRepository: Send + Sync {
    /// Insert a capsule and return the stored row.
    async fn insert(&self, capsule: &NewCapsule) -> Result<TimeCapsule, CapsuleRepositoryError>;

    /// Fetch a capsule by id.
    async fn find(&self, id: CapsuleId) -> Result<Option<TimeCapsule>, CapsuleRepositoryError>;

    /// Every capsule, ordered by id.
    async fn list(&self) -> Result<Vec<TimeCapsule>, CapsuleRepositoryError>;

    /// Capsules created by `creator`, newest first.
    async fn list_by_creator(
        &self,
        creator: ProfileId,
    ) -> Result<Vec<TimeCapsule>, CapsuleRepositoryError>;

    /// Overwrite a stored capsule. Returns `false` when the row is gone.
    async fn update(&self, capsule: &TimeCapsule) -> Result<bool, CapsuleRepositoryError>;

    /// Delete a capsule. Returns `false` when the row is gone.
    async fn delete(&self, id: CapsuleId) -> Result<bool, CapsuleRepositoryError>;
}

/// Persistence for content stored inside capsules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapsuleContentRepository: Send + Sync {
    /// Insert content and return the stored row.
    async fn insert(
        &self,
        content: &NewCapsuleContent,
    ) -> Result<CapsuleContent, CapsuleRepositoryError>;

    /// Fetch content by id.
    async fn find(
        &self,
        id: CapsuleContentId,
    ) -> Result<Option<CapsuleContent>, CapsuleRepositoryError>;

    /// Content matching `filter`, ordered by id.
    async fn list(
        &self,
        filter: &CapsuleContentFilter,
    ) -> Result<Vec<CapsuleContent>, CapsuleRepositoryError>;

    /// Overwrite stored content. Returns `false` when the row is gone.
    async fn update(&self, content: &CapsuleContent) -> Result<bool, CapsuleRepositoryError>;

    /// Delete content. Returns `false` when the row is gone.
    async fn delete(&self, id: CapsuleContentId) -> Result<bool, CapsuleRepositoryError>;
}
