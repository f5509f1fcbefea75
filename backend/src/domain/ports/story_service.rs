//! Driving port for branching story use-cases.

use async_trait::async_trait;

use crate::domain::{
    CapsuleContentId, Error, StoryChoiceDetail, StoryChoiceFilter, StoryChoiceId, StoryNodeDetail,
    StoryNodeFilter, StoryNodeId,
};

/// Fields accepted when creating a story node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoryNodeRequest {
    /// Capsule content the story belongs to.
    pub capsule_content: CapsuleContentId,
    /// Parent passage; `None` creates a root.
    pub parent_node: Option<StoryNodeId>,
    /// Passage text.
    pub content: String,
}

/// Overwrite of a story node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStoryNodeRequest {
    /// Node to overwrite.
    pub id: StoryNodeId,
    /// Replacement content, if any.
    pub capsule_content: Option<CapsuleContentId>,
    /// `None` keeps the parent, `Some(None)` makes a root, `Some(Some(id))`
    /// re-parents.
    pub parent_node: Option<Option<StoryNodeId>>,
    /// Passage text; required, checked once the node is found.
    pub content: Option<String>,
}

/// Fields accepted when creating a story choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoryChoiceRequest {
    /// Node the choice is offered on.
    pub node: StoryNodeId,
    /// Label shown to the reader.
    pub choice_text: String,
    /// Node the choice leads to.
    pub next_node: StoryNodeId,
}

/// Overwrite of a story choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStoryChoiceRequest {
    /// Choice to overwrite.
    pub id: StoryChoiceId,
    /// Replacement source node, if any.
    pub node: Option<StoryNodeId>,
    /// Label shown to the reader; required.
    pub choice_text: Option<String>,
    /// Replacement target node, if any.
    pub next_node: Option<StoryNodeId>,
}

/// Domain use-case port for story nodes and choices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryService: Send + Sync {
    /// Nodes matching `filter`, ordered by id.
    async fn list_nodes(&self, filter: StoryNodeFilter) -> Result<Vec<StoryNodeDetail>, Error>;

    /// Fetch one node.
    async fn get_node(&self, id: StoryNodeId) -> Result<StoryNodeDetail, Error>;

    /// Create a node.
    async fn create_node(&self, request: CreateStoryNodeRequest)
    -> Result<StoryNodeDetail, Error>;

    /// Overwrite a node.
    async fn update_node(&self, request: UpdateStoryNodeRequest) -> Result<(), Error>;

    /// Delete a node with its descendants and their choices.
    async fn delete_node(&self, id: StoryNodeId) -> Result<(), Error>;

    /// Choices matching `filter`, ordered by id.
    async fn list_choices(
        &self,
        filter: StoryChoiceFilter,
    ) -> Result<Vec<StoryChoiceDetail>, Error>;

    /// Fetch one choice.
    async fn get_choice(&self, id: StoryChoiceId) -> Result<StoryChoiceDetail, Error>;

    /// Create a choice.
    async fn create_choice(
        &self,
        request: CreateStoryChoiceRequest,
    ) -> Result<StoryChoiceDetail, Error>;

    /// Overwrite a choice.
    async fn update_choice(&self, request: UpdateStoryChoiceRequest) -> Result<(), Error>;

    /// Delete a choice.
    async fn delete_choice(&self, id: StoryChoiceId) -> Result<(), Error>;
}
