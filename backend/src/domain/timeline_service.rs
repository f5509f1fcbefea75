//! Per-user timeline, statistics, and achievements.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CapsuleRepository, DiscussionCommentRepository, DiscussionThreadRepository, LookupRepository,
    PredictionRepository, TimelineService,
};
use crate::domain::service_support::stored_lookup;
use crate::domain::{
    AchievementInputs, CommentFilter, Error, LookupKind, PredictionFilter, ProfileId,
    ThreadFilter, TimelineEntry, TimelineStatistics, achievements,
};

/// Timeline service implementing [`TimelineService`].
#[derive(Clone)]
pub struct Timeline {
    capsules: Arc<dyn CapsuleRepository>,
    threads: Arc<dyn DiscussionThreadRepository>,
    comments: Arc<dyn DiscussionCommentRepository>,
    predictions: Arc<dyn PredictionRepository>,
    lookups: Arc<dyn LookupRepository>,
}

impl Timeline {
    /// Create the service over its repositories.
    pub fn new(
        capsules: Arc<dyn CapsuleRepository>,
        threads: Arc<dyn DiscussionThreadRepository>,
        comments: Arc<dyn DiscussionCommentRepository>,
        predictions: Arc<dyn PredictionRepository>,
        lookups: Arc<dyn LookupRepository>,
    ) -> Self {
        Self {
            capsules,
            threads,
            comments,
            predictions,
            lookups,
        }
    }
}

#[async_trait]
impl TimelineService for Timeline {
    async fn timeline(&self, caller: ProfileId) -> Result<Vec<TimelineEntry>, Error> {
        let capsules = self.capsules.list_by_creator(caller).await?;
        let mut entries = Vec::with_capacity(capsules.len());
        for capsule in capsules {
            let status = stored_lookup(
                self.lookups.as_ref(),
                LookupKind::CapsuleStatus,
                capsule.status,
            )
            .await?;
            let capsule_type = stored_lookup(
                self.lookups.as_ref(),
                LookupKind::CapsuleType,
                capsule.capsule_type,
            )
            .await?;
            let discussion_count = self
                .threads
                .count(&ThreadFilter {
                    capsule: Some(capsule.id),
                    ..ThreadFilter::default()
                })
                .await?;
            entries.push(TimelineEntry {
                capsule,
                status,
                capsule_type,
                discussion_count,
            });
        }
        Ok(entries)
    }

    async fn statistics(&self, caller: ProfileId) -> Result<TimelineStatistics, Error> {
        let statuses = self.lookups.list(LookupKind::CapsuleStatus).await?;
        let mut capsules = self.capsules.list_by_creator(caller).await?;
        capsules.sort_by_key(|capsule| (capsule.created_at, capsule.id));

        let mut status_stats: BTreeMap<String, u64> = statuses
            .iter()
            .map(|status| (status.name.clone(), 0))
            .collect();
        for capsule in &capsules {
            if let Some(status) = statuses.iter().find(|status| status.id == capsule.status) {
                *status_stats.entry(status.name.clone()).or_insert(0) += 1;
            }
        }

        let threads = self
            .threads
            .list(&ThreadFilter {
                created_by: Some(caller),
                ..ThreadFilter::default()
            })
            .await?;
        let total_comments = self
            .comments
            .count(&CommentFilter {
                author: Some(caller),
                ..CommentFilter::default()
            })
            .await?;
        let verified = self
            .predictions
            .list(&PredictionFilter {
                verified_by: Some(caller),
                ..PredictionFilter::default()
            })
            .await?;

        let inputs = AchievementInputs {
            capsule_dates: capsules.iter().map(|capsule| capsule.created_at).collect(),
            first_discussion: threads.iter().map(|thread| thread.created_at).min(),
            first_verification: verified
                .iter()
                .filter_map(|prediction| prediction.verification_date)
                .min(),
        };

        Ok(TimelineStatistics {
            status_stats,
            total_created: capsules.len() as u64,
            total_discussions: threads.len() as u64,
            total_comments,
            total_verified: verified.len() as u64,
            achievements: achievements(&inputs),
        })
    }

    async fn discovery_history(&self, _caller: ProfileId) -> Result<Vec<TimelineEntry>, Error> {
        Ok(Vec::new())
    }
}
