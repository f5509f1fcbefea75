//! Story node and choice ports over the in-memory tables.

use async_trait::async_trait;

use crate::domain::ports::{StoryChoiceRepository, StoryNodeRepository, StoryRepositoryError};
use crate::domain::{
    NewStoryChoice, NewStoryNode, StoryChoice, StoryChoiceFilter, StoryChoiceId, StoryNode,
    StoryNodeFilter, StoryNodeId,
};

use super::InMemoryStore;

#[async_trait]
impl StoryNodeRepository for InMemoryStore {
    async fn insert(&self, node: &NewStoryNode) -> Result<StoryNode, StoryRepositoryError> {
        let mut tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables
            .nodes
            .insert_with(|id| node.clone().into_node(StoryNodeId::new(id))))
    }

    async fn find(&self, id: StoryNodeId) -> Result<Option<StoryNode>, StoryRepositoryError> {
        let tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables.nodes.get(id.get()).cloned())
    }

    async fn list(&self, filter: &StoryNodeFilter) -> Result<Vec<StoryNode>, StoryRepositoryError> {
        let tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables.nodes.select(|node| filter.matches(node)))
    }

    async fn update(&self, node: &StoryNode) -> Result<bool, StoryRepositoryError> {
        let mut tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables.nodes.replace(node.id.get(), node.clone()))
    }

    async fn delete(&self, id: StoryNodeId) -> Result<bool, StoryRepositoryError> {
        let mut tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables.delete_node(id))
    }
}

#[async_trait]
impl StoryChoiceRepository for InMemoryStore {
    async fn insert(&self, choice: &NewStoryChoice) -> Result<StoryChoice, StoryRepositoryError> {
        let mut tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables
            .choices
            .insert_with(|id| choice.clone().into_choice(StoryChoiceId::new(id))))
    }

    async fn find(&self, id: StoryChoiceId) -> Result<Option<StoryChoice>, StoryRepositoryError> {
        let tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables.choices.get(id.get()).cloned())
    }

    async fn list(
        &self,
        filter: &StoryChoiceFilter,
    ) -> Result<Vec<StoryChoice>, StoryRepositoryError> {
        let tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables.choices.select(|choice| filter.matches(choice)))
    }

    async fn update(&self, choice: &StoryChoice) -> Result<bool, StoryRepositoryError> {
        let mut tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables.choices.replace(choice.id.get(), choice.clone()))
    }

    async fn delete(&self, id: StoryChoiceId) -> Result<bool, StoryRepositoryError> {
        let mut tables = self.lock().map_err(StoryRepositoryError::query)?;
        Ok(tables.choices.remove(id.get()).is_some())
    }
}
