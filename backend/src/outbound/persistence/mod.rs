//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository port has a `Diesel*Repository` implementation sharing one
//! [`DbPool`]. Adapters only translate between row structs and domain rows;
//! reference checks and authorship live in the domain services.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module.
//!
//! # Example
//!
//! ```no_run
//! use timecapsule::outbound::persistence::{
//!     DbPool, DieselCapsuleRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn connect() -> Result<(), timecapsule::outbound::persistence::PoolError> {
//! let url = "postgres://localhost/timecapsule";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let _capsules = DieselCapsuleRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_capsule_repository;
mod diesel_discussion_repository;
mod diesel_error_mapping;
mod diesel_lookup_repository;
mod diesel_prediction_repository;
mod diesel_story_repository;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_capsule_repository::{DieselCapsuleContentRepository, DieselCapsuleRepository};
pub use diesel_discussion_repository::{
    DieselDiscussionCommentRepository, DieselDiscussionThreadRepository,
};
pub use diesel_lookup_repository::DieselLookupRepository;
pub use diesel_prediction_repository::DieselPredictionRepository;
pub use diesel_story_repository::{DieselStoryChoiceRepository, DieselStoryNodeRepository};
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};
