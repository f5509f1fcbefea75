//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) describe the persistence the domain needs;
//! driving ports (`*Service`, `LookupQuery`) are what inbound adapters call.

mod macros;
pub(crate) use macros::{define_port_error, map_port_error};

mod account_repository;
mod account_service;
mod capsule_repository;
mod capsule_service;
mod discussion_repository;
mod discussion_service;
mod lookup_query;
mod lookup_repository;
mod prediction_repository;
mod prediction_service;
mod repositories;
mod story_repository;
mod story_service;
mod timeline_service;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use capsule_repository::{MockCapsuleContentRepository, MockCapsuleRepository};
pub use capsule_repository::{
    CapsuleContentRepository, CapsuleRepository, CapsuleRepositoryError,
};
#[cfg(test)]
pub use capsule_service::{MockCapsuleContentService, MockCapsuleService};
pub use capsule_service::{
    CapsuleContentService, CapsuleService, CreateCapsuleContentRequest, CreateCapsuleRequest,
    UpdateCapsuleContentRequest, UpdateCapsuleRequest,
};
#[cfg(test)]
pub use discussion_repository::{
    MockDiscussionCommentRepository, MockDiscussionThreadRepository,
};
pub use discussion_repository::{
    DiscussionCommentRepository, DiscussionRepositoryError, DiscussionThreadRepository,
};
#[cfg(test)]
pub use discussion_service::MockDiscussionService;
pub use discussion_service::{
    CreateCommentRequest, CreateThreadRequest, DiscussionService, UpdateCommentRequest,
    UpdateThreadRequest,
};
#[cfg(test)]
pub use lookup_query::MockLookupQuery;
pub use lookup_query::LookupQuery;
#[cfg(test)]
pub use lookup_repository::MockLookupRepository;
pub use lookup_repository::{LookupRepository, LookupRepositoryError};
#[cfg(test)]
pub use prediction_repository::MockPredictionRepository;
pub use prediction_repository::{PredictionRepository, PredictionRepositoryError};
#[cfg(test)]
pub use prediction_service::MockPredictionService;
pub use prediction_service::{
    CreatePredictionRequest, PredictionService, UpdatePredictionRequest, VerifyPredictionRequest,
};
pub use repositories::Repositories;
#[cfg(test)]
pub use story_repository::{MockStoryChoiceRepository, MockStoryNodeRepository};
pub use story_repository::{StoryChoiceRepository, StoryNodeRepository, StoryRepositoryError};
#[cfg(test)]
pub use story_service::MockStoryService;
pub use story_service::{
    CreateStoryChoiceRequest, CreateStoryNodeRequest, StoryService, UpdateStoryChoiceRequest,
    UpdateStoryNodeRequest,
};
#[cfg(test)]
pub use timeline_service::MockTimelineService;
pub use timeline_service::TimelineService;
