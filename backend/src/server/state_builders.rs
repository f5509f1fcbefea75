//! Builders for the repository bundle and HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use timecapsule::domain::LookupKind;
use timecapsule::domain::ports::Repositories;
use timecapsule::inbound::http::state::HttpState;
use timecapsule::outbound::memory::InMemoryStore;
use timecapsule::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselCapsuleContentRepository, DieselCapsuleRepository,
    DieselDiscussionCommentRepository, DieselDiscussionThreadRepository, DieselLookupRepository,
    DieselPredictionRepository, DieselStoryChoiceRepository, DieselStoryNodeRepository,
};

use super::ServerConfig;

fn diesel_repositories(pool: &DbPool) -> Repositories {
    Repositories {
        accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
        lookups: Arc::new(DieselLookupRepository::new(pool.clone())),
        capsules: Arc::new(DieselCapsuleRepository::new(pool.clone())),
        contents: Arc::new(DieselCapsuleContentRepository::new(pool.clone())),
        predictions: Arc::new(DieselPredictionRepository::new(pool.clone())),
        story_nodes: Arc::new(DieselStoryNodeRepository::new(pool.clone())),
        story_choices: Arc::new(DieselStoryChoiceRepository::new(pool.clone())),
        threads: Arc::new(DieselDiscussionThreadRepository::new(pool.clone())),
        comments: Arc::new(DieselDiscussionCommentRepository::new(pool.clone())),
    }
}

fn memory_repositories(seed_lookups: bool) -> Repositories {
    let store = if seed_lookups {
        InMemoryStore::new()
    } else {
        InMemoryStore::seeded_except(&LookupKind::ALL)
    };
    Repositories::shared(Arc::new(store))
}

/// Pick PostgreSQL when a pool is configured, the in-memory store otherwise.
pub(crate) fn build_repositories(config: &ServerConfig) -> Repositories {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            diesel_repositories(pool)
        }
        None => {
            info!(seed_lookups = config.seed_lookups, "using in-memory repositories");
            memory_repositories(config.seed_lookups)
        }
    }
}

/// Wire every domain service over the configured store.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repositories = build_repositories(config);
    web::Data::new(HttpState::from_repositories(
        &repositories,
        Arc::new(DefaultClock),
    ))
}
