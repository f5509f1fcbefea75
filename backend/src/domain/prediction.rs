//! Predictions sealed in capsule content and their verification.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::lookup::{DISPROVED, VERIFIED};
use super::{
    CapsuleContent, CapsuleContentId, Lookup, LookupId, PredictionId, ProfileId, UserProfile,
};

/// Longest category label the schema accepts.
pub const CATEGORY_MAX_CHARS: usize = 50;

/// A forecast attached to capsule content, later verified by any user.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Row key.
    pub id: PredictionId,
    /// Content the prediction is sealed in.
    pub capsule_content: CapsuleContentId,
    /// Forecast text.
    pub prediction_text: String,
    /// Free-text category.
    pub category: Option<String>,
    /// Verification status lookup.
    pub verification_status: LookupId,
    /// When the prediction was last verified.
    pub verification_date: Option<DateTime<Utc>>,
    /// Who last verified the prediction.
    pub verification_user: Option<ProfileId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrediction {
    /// Content the prediction is sealed in.
    pub capsule_content: CapsuleContentId,
    /// Forecast text.
    pub prediction_text: String,
    /// Free-text category.
    pub category: Option<String>,
    /// Initial verification status, normally `pending`.
    pub verification_status: LookupId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl NewPrediction {
    /// Materialise the stored row once the key is known.
    #[must_use]
    pub fn into_prediction(self, id: PredictionId) -> Prediction {
        Prediction {
            id,
            capsule_content: self.capsule_content,
            prediction_text: self.prediction_text,
            category: self.category,
            verification_status: self.verification_status,
            verification_date: None,
            verification_user: None,
            created_at: self.created_at,
        }
    }
}

/// List filter for predictions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionFilter {
    /// Only predictions in this content.
    pub capsule_content: Option<CapsuleContentId>,
    /// Only predictions in this verification status.
    pub verification_status: Option<LookupId>,
    /// Only predictions with exactly this category.
    pub category: Option<String>,
    /// Only predictions last verified by this profile.
    pub verified_by: Option<ProfileId>,
}

impl PredictionFilter {
    /// Whether `prediction` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, prediction: &Prediction) -> bool {
        self.capsule_content
            .is_none_or(|id| prediction.capsule_content == id)
            && self
                .verification_status
                .is_none_or(|id| prediction.verification_status == id)
            && self
                .category
                .as_deref()
                .is_none_or(|category| prediction.category.as_deref() == Some(category))
            && self
                .verified_by
                .is_none_or(|id| prediction.verification_user == Some(id))
    }
}

/// Prediction with its foreign keys expanded one level.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDetail {
    /// The prediction row.
    pub prediction: Prediction,
    /// Content the prediction is sealed in.
    pub capsule_content: CapsuleContent,
    /// Verification status row.
    pub verification_status: Lookup,
    /// Last verifier's profile.
    pub verification_user: Option<UserProfile>,
}

/// Share of resolved predictions that came true.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyStats {
    /// Predictions in the `verified` status.
    pub verified: u64,
    /// Predictions in the `disproved` status.
    pub disproved: u64,
    /// `verified + disproved`.
    pub total_verified: u64,
    /// `verified / total_verified * 100`, or `0` with nothing resolved.
    pub accuracy_percentage: f64,
}

impl AccuracyStats {
    /// Derive accuracy from resolved counts.
    ///
    /// # Examples
    /// ```
    /// use timecapsule::domain::AccuracyStats;
    ///
    /// assert_eq!(AccuracyStats::from_counts(0, 0).accuracy_percentage, 0.0);
    /// assert_eq!(AccuracyStats::from_counts(3, 1).accuracy_percentage, 75.0);
    /// ```
    #[must_use]
    pub fn from_counts(verified: u64, disproved: u64) -> Self {
        let total_verified = verified.saturating_add(disproved);
        let accuracy_percentage = if total_verified == 0 {
            0.0
        } else {
            ratio(verified, total_verified) * 100.0
        };
        Self {
            verified,
            disproved,
            total_verified,
            accuracy_percentage,
        }
    }
}

// Counts stay far below 2^52, so the conversion is exact.
fn ratio(numerator: u64, denominator: u64) -> f64 {
    numerator as f64 / denominator as f64
}

/// Aggregate counts over every prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionStatistics {
    /// Count per verification status name, zero counts included.
    pub verification_stats: BTreeMap<String, u64>,
    /// Count per non-empty category.
    pub category_stats: BTreeMap<String, u64>,
    /// Verified versus disproved.
    pub accuracy_stats: AccuracyStats,
}

impl PredictionStatistics {
    /// Tally `predictions` against the full list of verification statuses.
    #[must_use]
    pub fn tally(statuses: &[Lookup], predictions: &[Prediction]) -> Self {
        let mut verification_stats: BTreeMap<String, u64> = statuses
            .iter()
            .map(|status| (status.name.clone(), 0))
            .collect();
        let mut category_stats: BTreeMap<String, u64> = BTreeMap::new();

        for prediction in predictions {
            if let Some(status) = statuses
                .iter()
                .find(|status| status.id == prediction.verification_status)
            {
                *verification_stats.entry(status.name.clone()).or_insert(0) += 1;
            }
            if let Some(category) = prediction.category.as_deref().filter(|c| !c.is_empty()) {
                *category_stats.entry(category.to_owned()).or_insert(0) += 1;
            }
        }

        let count_named = |name: &str| -> u64 {
            let ids: Vec<LookupId> = statuses
                .iter()
                .filter(|status| status.name == name)
                .map(|status| status.id)
                .collect();
            predictions
                .iter()
                .filter(|prediction| ids.contains(&prediction.verification_status))
                .count() as u64
        };

        Self {
            accuracy_stats: AccuracyStats::from_counts(
                count_named(VERIFIED),
                count_named(DISPROVED),
            ),
            verification_stats,
            category_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn statuses() -> Vec<Lookup> {
        vec![
            Lookup::new(LookupId::new(1), "pending"),
            Lookup::new(LookupId::new(2), "verified"),
            Lookup::new(LookupId::new(3), "disproved"),
        ]
    }

    fn prediction(id: i64, status: i64, category: Option<&str>) -> Prediction {
        Prediction {
            id: PredictionId::new(id),
            capsule_content: CapsuleContentId::new(1),
            prediction_text: "it will rain".to_owned(),
            category: category.map(str::to_owned),
            verification_status: LookupId::new(status),
            verification_date: None,
            verification_user: None,
            created_at: Utc
                .with_ymd_and_hms(2030, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    #[case(0, 0, 0.0)]
    #[case(1, 0, 100.0)]
    #[case(1, 1, 50.0)]
    #[case(1, 3, 25.0)]
    fn accuracy_percentage(#[case] verified: u64, #[case] disproved: u64, #[case] expected: f64) {
        let stats = AccuracyStats::from_counts(verified, disproved);
        assert_eq!(stats.total_verified, verified + disproved);
        assert!((stats.accuracy_percentage - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn tally_includes_zero_counts_for_every_status() {
        let stats = PredictionStatistics::tally(&statuses(), &[]);
        assert_eq!(stats.verification_stats.len(), 3);
        assert!(stats.verification_stats.values().all(|count| *count == 0));
        assert!(stats.category_stats.is_empty());
        assert_eq!(stats.accuracy_stats.accuracy_percentage, 0.0);
    }

    #[rstest]
    fn tally_groups_by_status_and_category() {
        let predictions = vec![
            prediction(1, 1, Some("weather")),
            prediction(2, 2, Some("weather")),
            prediction(3, 2, None),
            prediction(4, 3, Some("")),
            prediction(5, 3, Some("sport")),
        ];
        let stats = PredictionStatistics::tally(&statuses(), &predictions);

        assert_eq!(stats.verification_stats.get("pending"), Some(&1));
        assert_eq!(stats.verification_stats.get("verified"), Some(&2));
        assert_eq!(stats.verification_stats.get("disproved"), Some(&2));
        assert_eq!(stats.category_stats.get("weather"), Some(&2));
        assert_eq!(stats.category_stats.get("sport"), Some(&1));
        assert!(!stats.category_stats.contains_key(""));
        assert_eq!(stats.accuracy_stats.total_verified, 4);
        assert!((stats.accuracy_stats.accuracy_percentage - 50.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn filter_matches_category_exactly() {
        let filter = PredictionFilter {
            category: Some("weather".to_owned()),
            ..PredictionFilter::default()
        };
        assert!(filter.matches(&prediction(1, 1, Some("weather"))));
        assert!(!filter.matches(&prediction(2, 1, Some("Weather"))));
        assert!(!filter.matches(&prediction(3, 1, None)));
    }
}
