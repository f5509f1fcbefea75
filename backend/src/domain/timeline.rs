//! Per-user timeline projections, statistics, and achievements.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{Lookup, TimeCapsule};

/// One of the caller's capsules as shown on their timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    /// The capsule row.
    pub capsule: TimeCapsule,
    /// Capsule status row.
    pub status: Lookup,
    /// Capsule type row.
    pub capsule_type: Lookup,
    /// Threads opened on the capsule.
    pub discussion_count: u64,
}

/// A milestone the caller has reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    /// Display name.
    pub name: &'static str,
    /// What earned it.
    pub description: &'static str,
    /// Timestamp of the qualifying record.
    pub date_earned: DateTime<Utc>,
}

/// Aggregate activity for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStatistics {
    /// Caller's capsule count per status name, zero counts included.
    pub status_stats: BTreeMap<String, u64>,
    /// Capsules created.
    pub total_created: u64,
    /// Threads opened.
    pub total_discussions: u64,
    /// Comments written.
    pub total_comments: u64,
    /// Predictions verified.
    pub total_verified: u64,
    /// Earned milestones in ladder order.
    pub achievements: Vec<Achievement>,
}

/// Inputs for the achievement ladder.
///
/// `capsule_dates` must be ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementInputs {
    /// Creation times of the caller's capsules, oldest first.
    pub capsule_dates: Vec<DateTime<Utc>>,
    /// Creation time of the caller's first thread.
    pub first_discussion: Option<DateTime<Utc>>,
    /// Earliest verification the caller performed.
    pub first_verification: Option<DateTime<Utc>>,
}

const CAPSULE_MILESTONES: [(usize, &str, &str); 3] = [
    (1, "Time Capsule Creator", "Created your first time capsule"),
    (5, "Time Capsule Enthusiast", "Created 5 time capsules"),
    (10, "Time Capsule Master", "Created 10 time capsules"),
];

/// Evaluate the fixed achievement ladder.
///
/// Capsule milestones are stamped with the creation time of the capsule that
/// reached the threshold.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use timecapsule::domain::{AchievementInputs, achievements};
///
/// let day = |d| Utc.with_ymd_and_hms(2030, 1, d, 0, 0, 0).single().expect("date");
/// let earned = achievements(&AchievementInputs {
///     capsule_dates: (1..=5).map(day).collect(),
///     ..AchievementInputs::default()
/// });
/// let names: Vec<_> = earned.iter().map(|a| a.name).collect();
/// assert_eq!(names, ["Time Capsule Creator", "Time Capsule Enthusiast"]);
/// assert_eq!(earned[1].date_earned, day(5));
/// ```
#[must_use]
pub fn achievements(inputs: &AchievementInputs) -> Vec<Achievement> {
    let mut earned: Vec<Achievement> = CAPSULE_MILESTONES
        .iter()
        .filter_map(|(threshold, name, description)| {
            inputs
                .capsule_dates
                .get(threshold.saturating_sub(1))
                .map(|date| Achievement {
                    name,
                    description,
                    date_earned: *date,
                })
        })
        .collect();

    if let Some(date_earned) = inputs.first_discussion {
        earned.push(Achievement {
            name: "Discussion Starter",
            description: "Started your first discussion",
            date_earned,
        });
    }
    if let Some(date_earned) = inputs.first_verification {
        earned.push(Achievement {
            name: "Prediction Verifier",
            description: "Verified your first prediction",
            date_earned,
        });
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, d, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn names(inputs: &AchievementInputs) -> Vec<&'static str> {
        achievements(inputs).iter().map(|a| a.name).collect()
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(1, vec!["Time Capsule Creator"])]
    #[case(4, vec!["Time Capsule Creator"])]
    #[case(5, vec!["Time Capsule Creator", "Time Capsule Enthusiast"])]
    #[case(9, vec!["Time Capsule Creator", "Time Capsule Enthusiast"])]
    #[case(
        10,
        vec!["Time Capsule Creator", "Time Capsule Enthusiast", "Time Capsule Master"]
    )]
    fn capsule_ladder(#[case] count: u32, #[case] expected: Vec<&'static str>) {
        let inputs = AchievementInputs {
            capsule_dates: (1..=count).map(day).collect(),
            ..AchievementInputs::default()
        };
        assert_eq!(names(&inputs), expected);
    }

    #[rstest]
    fn milestones_use_the_qualifying_capsule_date() {
        let inputs = AchievementInputs {
            capsule_dates: (1..=10).map(day).collect(),
            ..AchievementInputs::default()
        };
        let dates: Vec<_> = achievements(&inputs)
            .into_iter()
            .map(|a| a.date_earned)
            .collect();
        assert_eq!(dates, vec![day(1), day(5), day(10)]);
    }

    #[rstest]
    fn discussion_and_verification_follow_capsule_milestones() {
        let inputs = AchievementInputs {
            capsule_dates: vec![day(1)],
            first_discussion: Some(day(2)),
            first_verification: Some(day(3)),
        };
        assert_eq!(
            names(&inputs),
            vec![
                "Time Capsule Creator",
                "Discussion Starter",
                "Prediction Verifier"
            ]
        );
    }
}
