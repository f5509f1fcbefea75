//! Driving port for the caller's timeline and achievements.

use async_trait::async_trait;

use crate::domain::{Error, ProfileId, TimelineEntry, TimelineStatistics};

/// Domain use-case port for per-user timeline reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimelineService: Send + Sync {
    /// The caller's capsules, newest first.
    async fn timeline(&self, caller: ProfileId) -> Result<Vec<TimelineEntry>, Error>;

    /// Counts and achievements for the caller.
    async fn statistics(&self, caller: ProfileId) -> Result<TimelineStatistics, Error>;

    /// Capsules the caller has discovered. Discovery is not tracked yet.
    async fn discovery_history(&self, caller: ProfileId) -> Result<Vec<TimelineEntry>, Error>;
}
