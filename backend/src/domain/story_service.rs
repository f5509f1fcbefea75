//! Story node and choice domain service.
//!
//! Nodes and choices are flat rows. Parent links and choice targets are
//! checked for existence only; the resulting graph is never walked.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::error;

use crate::domain::ports::{
    CapsuleContentRepository, CreateStoryChoiceRequest, CreateStoryNodeRequest,
    StoryChoiceRepository, StoryNodeRepository, StoryService, UpdateStoryChoiceRequest,
    UpdateStoryNodeRequest,
};
use crate::domain::service_support::{referenced_but_missing, required};
use crate::domain::{
    CapsuleContentId, Error, NewStoryChoice, NewStoryNode, StoryChoice, StoryChoiceDetail,
    StoryChoiceFilter, StoryChoiceId, StoryNode, StoryNodeDetail, StoryNodeFilter, StoryNodeId,
};

const INVALID_CAPSULE_CONTENT: &str = "Invalid capsule content id sent";
const INVALID_PARENT_NODE: &str = "Invalid parent node id sent";
const INVALID_NODE: &str = "Invalid node id sent";
const INVALID_NEXT_NODE: &str = "Invalid next_node id sent";

fn node_not_found() -> Error {
    Error::not_found("Story node not found")
}

fn choice_not_found() -> Error {
    Error::not_found("Story choice not found")
}

/// Story service implementing [`StoryService`].
#[derive(Clone)]
pub struct Stories {
    nodes: Arc<dyn StoryNodeRepository>,
    choices: Arc<dyn StoryChoiceRepository>,
    contents: Arc<dyn CapsuleContentRepository>,
    clock: Arc<dyn Clock>,
}

impl Stories {
    /// Create the service over its repositories and clock.
    pub fn new(
        nodes: Arc<dyn StoryNodeRepository>,
        choices: Arc<dyn StoryChoiceRepository>,
        contents: Arc<dyn CapsuleContentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            nodes,
            choices,
            contents,
            clock,
        }
    }

    async fn require_content(&self, id: CapsuleContentId) -> Result<(), Error> {
        match self.contents.find(id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(INVALID_CAPSULE_CONTENT)),
        }
    }

    async fn require_node(&self, id: StoryNodeId, reason: &str) -> Result<StoryNode, Error> {
        self.nodes
            .find(id)
            .await?
            .ok_or_else(|| Error::not_found(reason))
    }

    async fn stored_node(&self, id: StoryNodeId) -> Result<StoryNode, Error> {
        self.nodes
            .find(id)
            .await?
            .ok_or_else(|| referenced_but_missing("story node", id))
    }

    async fn node_detail(&self, node: StoryNode) -> Result<StoryNodeDetail, Error> {
        let capsule_content = self
            .contents
            .find(node.capsule_content)
            .await?
            .ok_or_else(|| referenced_but_missing("capsule content", node.capsule_content))?;
        let parent_node = match node.parent_node {
            Some(parent) => Some(self.stored_node(parent).await?),
            None => None,
        };
        Ok(StoryNodeDetail {
            node,
            capsule_content,
            parent_node,
        })
    }

    async fn choice_detail(&self, choice: StoryChoice) -> Result<StoryChoiceDetail, Error> {
        let node = self.stored_node(choice.node).await?;
        let next_node = self.stored_node(choice.next_node).await?;
        Ok(StoryChoiceDetail {
            choice,
            node,
            next_node,
        })
    }
}

#[async_trait]
impl StoryService for Stories {
    async fn list_nodes(&self, filter: StoryNodeFilter) -> Result<Vec<StoryNodeDetail>, Error> {
        let rows = self.nodes.list(&filter).await?;
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.node_detail(row).await?);
        }
        Ok(details)
    }

    async fn get_node(&self, id: StoryNodeId) -> Result<StoryNodeDetail, Error> {
        let node = self.nodes.find(id).await?.ok_or_else(node_not_found)?;
        self.node_detail(node).await
    }

    async fn create_node(
        &self,
        request: CreateStoryNodeRequest,
    ) -> Result<StoryNodeDetail, Error> {
        self.require_content(request.capsule_content).await?;
        if let Some(parent) = request.parent_node {
            self.require_node(parent, INVALID_PARENT_NODE).await?;
        }

        let node = self
            .nodes
            .insert(&NewStoryNode {
                capsule_content: request.capsule_content,
                parent_node: request.parent_node,
                content: request.content,
                created_at: self.clock.utc(),
            })
            .await?;
        self.node_detail(node).await
    }

    async fn update_node(&self, request: UpdateStoryNodeRequest) -> Result<(), Error> {
        let mut node = self
            .nodes
            .find(request.id)
            .await?
            .ok_or_else(node_not_found)?;
        let content = required("content", request.content)?;

        if let Some(capsule_content) = request.capsule_content {
            self.require_content(capsule_content).await?;
            node.capsule_content = capsule_content;
        }
        match request.parent_node {
            None => {}
            Some(None) => node.parent_node = None,
            Some(Some(parent)) => {
                self.require_node(parent, INVALID_PARENT_NODE).await?;
                node.parent_node = Some(parent);
            }
        }
        node.content = content;

        let updated = self.nodes.update(&node).await.map_err(|err| {
            error!(story_node_id = %node.id, error = %err, "error updating story node");
            Error::from(err)
        })?;
        if updated {
            Ok(())
        } else {
            Err(node_not_found())
        }
    }

    async fn delete_node(&self, id: StoryNodeId) -> Result<(), Error> {
        if self.nodes.delete(id).await? {
            Ok(())
        } else {
            Err(node_not_found())
        }
    }

    async fn list_choices(
        &self,
        filter: StoryChoiceFilter,
    ) -> Result<Vec<StoryChoiceDetail>, Error> {
        let rows = self.choices.list(&filter).await?;
        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            details.push(self.choice_detail(row).await?);
        }
        Ok(details)
    }

    async fn get_choice(&self, id: StoryChoiceId) -> Result<StoryChoiceDetail, Error> {
        let choice = self.choices.find(id).await?.ok_or_else(choice_not_found)?;
        self.choice_detail(choice).await
    }

    async fn create_choice(
        &self,
        request: CreateStoryChoiceRequest,
    ) -> Result<StoryChoiceDetail, Error> {
        let node = self.require_node(request.node, INVALID_NODE).await?;
        let next_node = self.require_node(request.next_node, INVALID_NEXT_NODE).await?;

        let choice = self
            .choices
            .insert(&NewStoryChoice {
                node: request.node,
                choice_text: request.choice_text,
                next_node: request.next_node,
                created_at: self.clock.utc(),
            })
            .await?;
        Ok(StoryChoiceDetail {
            choice,
            node,
            next_node,
        })
    }

    async fn update_choice(&self, request: UpdateStoryChoiceRequest) -> Result<(), Error> {
        let mut choice = self
            .choices
            .find(request.id)
            .await?
            .ok_or_else(choice_not_found)?;
        let choice_text = required("choice_text", request.choice_text)?;

        if let Some(node) = request.node {
            self.require_node(node, INVALID_NODE).await?;
            choice.node = node;
        }
        if let Some(next_node) = request.next_node {
            self.require_node(next_node, INVALID_NEXT_NODE).await?;
            choice.next_node = next_node;
        }
        choice.choice_text = choice_text;

        let updated = self.choices.update(&choice).await.map_err(|err| {
            error!(story_choice_id = %choice.id, error = %err, "error updating story choice");
            Error::from(err)
        })?;
        if updated {
            Ok(())
        } else {
            Err(choice_not_found())
        }
    }

    async fn delete_choice(&self, id: StoryChoiceId) -> Result<(), Error> {
        if self.choices.delete(id).await? {
            Ok(())
        } else {
            Err(choice_not_found())
        }
    }
}

#[cfg(test)]
#[path = "story_service_tests.rs"]
mod tests;
