//! Bundle of every driven port the domain services are built over.

use std::sync::Arc;

use super::{
    AccountRepository, CapsuleContentRepository, CapsuleRepository, DiscussionCommentRepository,
    DiscussionThreadRepository, LookupRepository, PredictionRepository, StoryChoiceRepository,
    StoryNodeRepository,
};

/// Repository handles shared by the services of one process.
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub lookups: Arc<dyn LookupRepository>,
    pub capsules: Arc<dyn CapsuleRepository>,
    pub contents: Arc<dyn CapsuleContentRepository>,
    pub predictions: Arc<dyn PredictionRepository>,
    pub story_nodes: Arc<dyn StoryNodeRepository>,
    pub story_choices: Arc<dyn StoryChoiceRepository>,
    pub threads: Arc<dyn DiscussionThreadRepository>,
    pub comments: Arc<dyn DiscussionCommentRepository>,
}

impl Repositories {
    /// Use one store that implements every port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use timecapsule::domain::ports::Repositories;
    /// use timecapsule::outbound::memory::InMemoryStore;
    ///
    /// let repositories = Repositories::shared(Arc::new(InMemoryStore::new()));
    /// let _lookups = repositories.lookups.clone();
    /// ```
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: AccountRepository
            + LookupRepository
            + CapsuleRepository
            + CapsuleContentRepository
            + PredictionRepository
            + StoryNodeRepository
            + StoryChoiceRepository
            + DiscussionThreadRepository
            + DiscussionCommentRepository
            + 'static,
    {
        Self {
            accounts: store.clone(),
            lookups: store.clone(),
            capsules: store.clone(),
            contents: store.clone(),
            predictions: store.clone(),
            story_nodes: store.clone(),
            story_choices: store.clone(),
            threads: store.clone(),
            comments: store,
        }
    }
}
