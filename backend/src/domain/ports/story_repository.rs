//! Port abstractions for story nodes and choices.

use async_trait::async_trait;

use crate::domain::{
    NewStoryChoice, NewStoryNode, StoryChoice, StoryChoiceFilter, StoryChoiceId, StoryNode,
    StoryNodeFilter, StoryNodeId,
};

use super::{define_port_error, map_port_error};

define_port_error! {
    /// Errors raised by story repository adapters.
    pub enum StoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "story repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "story repository query failed: {message}",
    }
}

map_port_error!(StoryRepositoryError, "story repository");

/// Persistence for story nodes.
///
/// Deleting a node removes its descendants and every choice touching them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryNodeRepository: Send + Sync {
    /// Insert a node and return the stored row.
    async fn insert(&self, node: &NewStoryNode) -> Result<StoryNode, StoryRepositoryError>;

    /// Fetch a node by id.
    async fn find(&self, id: StoryNodeId) -> Result<Option<StoryNode>, StoryRepositoryError>;

    /// Nodes matching `filter`, ordered by id.
    async fn list(&self, filter: &StoryNodeFilter) -> Result<Vec<StoryNode>, StoryRepositoryError>;

    /// Overwrite a stored node. Returns `false` when the row is gone.
    async fn update(&self, node: &StoryNode) -> Result<bool, StoryRepositoryError>;

    /// Delete a node. Returns `false` when the row is gone.
    async fn delete(&self, id: StoryNodeId) -> Result<bool, StoryRepositoryError>;
}

/// Persistence for story choices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryChoiceRepository: Send + Sync {
    /// Insert a choice and return the stored row.
    async fn insert(&self, choice: &NewStoryChoice) -> Result<StoryChoice, StoryRepositoryError>;

    /// Fetch a choice by id.
    async fn find(&self, id: StoryChoiceId) -> Result<Option<StoryChoice>, StoryRepositoryError>;

    /// Choices matching `filter`, ordered by id.
    async fn list(
        &self,
        filter: &StoryChoiceFilter,
    ) -> Result<Vec<StoryChoice>, StoryRepositoryError>;

    /// Overwrite a stored choice. Returns `false` when the row is gone.
    async fn update(&self, choice: &StoryChoice) -> Result<bool, StoryRepositoryError>;

    /// Delete a choice. Returns `false` when the row is gone.
    async fn delete(&self, id: StoryChoiceId) -> Result<bool, StoryRepositoryError>;
}
