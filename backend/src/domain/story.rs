//! Branching story nodes and the choices linking them.
//!
//! Nodes form a parent/child adjacency list keyed by id. Choices are edges
//! between any two nodes. No traversal or cycle check is performed: a node
//! may name itself, or one of its descendants, as parent.

use chrono::{DateTime, Utc};

use super::{CapsuleContent, CapsuleContentId, StoryChoiceId, StoryNodeId};

/// One passage in a branching story.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryNode {
    /// Row key.
    pub id: StoryNodeId,
    /// Capsule content the story belongs to.
    pub capsule_content: CapsuleContentId,
    /// Parent passage; `None` for a root.
    pub parent_node: Option<StoryNodeId>,
    /// Passage text.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a story node.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStoryNode {
    /// Capsule content the story belongs to.
    pub capsule_content: CapsuleContentId,
    /// Parent passage; `None` for a root.
    pub parent_node: Option<StoryNodeId>,
    /// Passage text.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NewStoryNode {
    /// Materialise the stored row once the key is known.
    #[must_use]
    pub fn into_node(self, id: StoryNodeId) -> StoryNode {
        StoryNode {
            id,
            capsule_content: self.capsule_content,
            parent_node: self.parent_node,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

/// List filter for story nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryNodeFilter {
    /// Only nodes attached to this content.
    pub capsule_content: Option<CapsuleContentId>,
    /// Only direct children of this node.
    pub parent_node: Option<StoryNodeId>,
    /// Only nodes without a parent.
    pub roots_only: bool,
}

impl StoryNodeFilter {
    /// Whether `node` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, node: &StoryNode) -> bool {
        self.capsule_content
            .is_none_or(|id| node.capsule_content == id)
            && self
                .parent_node
                .is_none_or(|id| node.parent_node == Some(id))
            && (!self.roots_only || node.parent_node.is_none())
    }
}

/// Story node with its foreign keys expanded one level.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryNodeDetail {
    /// The node row.
    pub node: StoryNode,
    /// Capsule content the story belongs to.
    pub capsule_content: CapsuleContent,
    /// Parent passage row, when present.
    pub parent_node: Option<StoryNode>,
}

/// A labelled edge from one story node to another.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryChoice {
    /// Row key.
    pub id: StoryChoiceId,
    /// Node the choice is offered on.
    pub node: StoryNodeId,
    /// Label shown to the reader.
    pub choice_text: String,
    /// Node the choice leads to.
    pub next_node: StoryNodeId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a story choice.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStoryChoice {
    /// Node the choice is offered on.
    pub node: StoryNodeId,
    /// Label shown to the reader.
    pub choice_text: String,
    /// Node the choice leads to.
    pub next_node: StoryNodeId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NewStoryChoice {
    /// Materialise the stored row once the key is known.
    #[must_use]
    pub fn into_choice(self, id: StoryChoiceId) -> StoryChoice {
        StoryChoice {
            id,
            node: self.node,
            choice_text: self.choice_text,
            next_node: self.next_node,
            created_at: self.created_at,
        }
    }
}

/// List filter for story choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryChoiceFilter {
    /// Only choices offered on this node.
    pub node: Option<StoryNodeId>,
    /// Only choices leading to this node.
    pub next_node: Option<StoryNodeId>,
}

impl StoryChoiceFilter {
    /// Whether `choice` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, choice: &StoryChoice) -> bool {
        self.node.is_none_or(|id| choice.node == id)
            && self.next_node.is_none_or(|id| choice.next_node == id)
    }
}

/// Story choice with both endpoints expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryChoiceDetail {
    /// The choice row.
    pub choice: StoryChoice,
    /// Node the choice is offered on.
    pub node: StoryNode,
    /// Node the choice leads to.
    pub next_node: StoryNode,
}
