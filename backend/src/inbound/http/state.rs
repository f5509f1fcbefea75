//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountService, CapsuleContentService, CapsuleService, DiscussionService, LookupQuery,
    PredictionService, Repositories, StoryService, TimelineService,
};
use crate::domain::{
    Accounts, CapsuleContents, Capsules, Discussions, Lookups, Predictions, Stories, Timeline,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountService>,
    pub lookups: Arc<dyn LookupQuery>,
    pub capsules: Arc<dyn CapsuleService>,
    pub capsule_contents: Arc<dyn CapsuleContentService>,
    pub stories: Arc<dyn StoryService>,
    pub predictions: Arc<dyn PredictionService>,
    pub discussions: Arc<dyn DiscussionService>,
    pub timeline: Arc<dyn TimelineService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub lookups: Arc<dyn LookupQuery>,
    pub capsules: Arc<dyn CapsuleService>,
    pub capsule_contents: Arc<dyn CapsuleContentService>,
    pub stories: Arc<dyn StoryService>,
    pub predictions: Arc<dyn PredictionService>,
    pub discussions: Arc<dyn DiscussionService>,
    pub timeline: Arc<dyn TimelineService>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            lookups,
            capsules,
            capsule_contents,
            stories,
            predictions,
            discussions,
            timeline,
        } = ports;
        Self {
            accounts,
            lookups,
            capsules,
            capsule_contents,
            stories,
            predictions,
            discussions,
            timeline,
        }
    }

    /// Build every domain service over `repositories`, stamping writes with
    /// `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use timecapsule::domain::ports::Repositories;
    /// use timecapsule::inbound::http::state::HttpState;
    /// use timecapsule::outbound::memory::InMemoryStore;
    ///
    /// let repositories = Repositories::shared(Arc::new(InMemoryStore::new()));
    /// let state = HttpState::from_repositories(&repositories, Arc::new(DefaultClock));
    /// let _capsules = state.capsules.clone();
    /// ```
    pub fn from_repositories(repositories: &Repositories, clock: Arc<dyn Clock>) -> Self {
        let Repositories {
            accounts,
            lookups,
            capsules,
            contents,
            predictions,
            story_nodes,
            story_choices,
            threads,
            comments,
        } = repositories.clone();

        Self::new(HttpStatePorts {
            accounts: Arc::new(Accounts::new(accounts.clone(), clock.clone())),
            lookups: Arc::new(Lookups::new(lookups.clone())),
            capsules: Arc::new(Capsules::new(
                capsules.clone(),
                lookups.clone(),
                clock.clone(),
            )),
            capsule_contents: Arc::new(CapsuleContents::new(
                contents.clone(),
                capsules.clone(),
                lookups.clone(),
                clock.clone(),
            )),
            stories: Arc::new(Stories::new(
                story_nodes,
                story_choices,
                contents.clone(),
                clock.clone(),
            )),
            predictions: Arc::new(Predictions::new(
                predictions.clone(),
                contents,
                lookups.clone(),
                accounts.clone(),
                clock.clone(),
            )),
            discussions: Arc::new(Discussions::new(
                threads.clone(),
                comments.clone(),
                capsules.clone(),
                accounts,
                clock,
            )),
            timeline: Arc::new(Timeline::new(
                capsules,
                threads,
                comments,
                predictions,
                lookups,
            )),
        })
    }
}
