//! Per-user timeline HTTP handlers.
//!
//! ```text
//! GET /usertimeline
//! GET /usertimeline/statistics
//! GET /usertimeline/discovery_history
//! ```

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Achievement, TimelineEntry, TimelineStatistics};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::schemas::{ErrorSchema, LookupBody, timestamp};
use crate::inbound::http::state::HttpState;

const OPENING_DATE_FORMAT: &str = "%Y-%m-%d";

/// A capsule as shown on its creator's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TimelineEntryBody {
    pub id: i64,
    pub status: LookupBody,
    #[serde(rename = "type")]
    pub capsule_type: LookupBody,
    pub title: String,
    pub descriptions: String,
    /// Calendar date only.
    #[schema(example = "2031-01-01")]
    pub opening_date: String,
    pub location_x: f64,
    pub location_y: f64,
    #[schema(format = "date-time")]
    pub created_at: String,
    pub discussion_count: u64,
}

impl From<TimelineEntry> for TimelineEntryBody {
    fn from(value: TimelineEntry) -> Self {
        let TimelineEntry {
            capsule,
            status,
            capsule_type,
            discussion_count,
        } = value;
        Self {
            id: capsule.id.get(),
            status: status.into(),
            capsule_type: capsule_type.into(),
            title: capsule.title,
            descriptions: capsule.descriptions,
            opening_date: capsule.opening_date.format(OPENING_DATE_FORMAT).to_string(),
            location_x: capsule.location_x,
            location_y: capsule.location_y,
            created_at: timestamp(capsule.created_at),
            discussion_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AchievementBody {
    #[schema(example = "Time Capsule Creator")]
    pub name: String,
    pub description: String,
    #[schema(format = "date-time")]
    pub date_earned: String,
}

impl From<Achievement> for AchievementBody {
    fn from(value: Achievement) -> Self {
        Self {
            name: value.name.to_owned(),
            description: value.description.to_owned(),
            date_earned: timestamp(value.date_earned),
        }
    }
}

/// The caller's activity counts and achievements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimelineStatisticsBody {
    /// Capsule count per status name, zero counts included.
    pub status_stats: BTreeMap<String, u64>,
    pub total_created: u64,
    pub total_discussions: u64,
    pub total_comments: u64,
    /// Predictions the caller verified.
    pub total_verified: u64,
    pub achievements: Vec<AchievementBody>,
}

impl From<TimelineStatistics> for TimelineStatisticsBody {
    fn from(value: TimelineStatistics) -> Self {
        Self {
            status_stats: value.status_stats,
            total_created: value.total_created,
            total_discussions: value.total_discussions,
            total_comments: value.total_comments,
            total_verified: value.total_verified,
            achievements: value
                .achievements
                .into_iter()
                .map(AchievementBody::from)
                .collect(),
        }
    }
}

/// The caller's capsules, newest first.
#[utoipa::path(
    get,
    path = "/usertimeline",
    responses(
        (status = 200, description = "Timeline entries", body = [TimelineEntryBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["timeline"],
    operation_id = "userTimeline"
)]
#[get("/usertimeline")]
pub async fn user_timeline(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<TimelineEntryBody>>> {
    let entries = state.timeline.timeline(caller.id()).await?;
    Ok(web::Json(
        entries.into_iter().map(TimelineEntryBody::from).collect(),
    ))
}

/// Counts and achievements for the caller.
#[utoipa::path(
    get,
    path = "/usertimeline/statistics",
    responses(
        (status = 200, description = "Timeline statistics", body = TimelineStatisticsBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["timeline"],
    operation_id = "userTimelineStatistics"
)]
#[get("/usertimeline/statistics")]
pub async fn timeline_statistics(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<TimelineStatisticsBody>> {
    let statistics = state.timeline.statistics(caller.id()).await?;
    Ok(web::Json(statistics.into()))
}

/// Capsules the caller has discovered. Always empty for now.
#[utoipa::path(
    get,
    path = "/usertimeline/discovery_history",
    responses(
        (status = 200, description = "Discovered capsules", body = [TimelineEntryBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["timeline"],
    operation_id = "userDiscoveryHistory"
)]
#[get("/usertimeline/discovery_history")]
pub async fn discovery_history(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<Vec<TimelineEntryBody>>> {
    let entries = state.timeline.discovery_history(caller.id()).await?;
    Ok(web::Json(
        entries.into_iter().map(TimelineEntryBody::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CapsuleId, Lookup, LookupId, ProfileId, TimeCapsule};
    use crate::inbound::http::test_utils::{AUTH_HEADER, MockPorts, profile};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn entry() -> TimelineEntry {
        let opening = Utc
            .with_ymd_and_hms(2031, 1, 1, 18, 30, 0)
            .single()
            .expect("valid timestamp");
        let created = Utc
            .with_ymd_and_hms(2026, 3, 4, 5, 6, 7)
            .single()
            .expect("valid timestamp");
        TimelineEntry {
            capsule: TimeCapsule {
                id: CapsuleId::new(8),
                creator: ProfileId::new(2),
                status: LookupId::new(1),
                capsule_type: LookupId::new(2),
                title: "letters".into(),
                descriptions: "for later".into(),
                opening_date: opening,
                location_x: 0.5,
                location_y: 1.5,
                created_at: created,
            },
            status: Lookup::new(LookupId::new(1), "sealed"),
            capsule_type: Lookup::new(LookupId::new(2), "personal"),
            discussion_count: 3,
        }
    }

    #[test]
    fn entry_renders_opening_date_as_calendar_day() {
        let value = serde_json::to_value(TimelineEntryBody::from(entry())).expect("serialise");
        assert_eq!(value["opening_date"], "2031-01-01");
        assert_eq!(value["type"]["name"], "personal");
        assert_eq!(value["status"]["id"], 1);
        assert_eq!(value["created_at"], "2026-03-04T05:06:07Z");
        assert_eq!(value["discussion_count"], 3);
    }

    #[actix_web::test]
    async fn timeline_is_scoped_to_the_caller() {
        let mut ports = MockPorts::signed_in(profile(2));
        ports
            .timeline
            .expect_timeline()
            .withf(|caller| *caller == ProfileId::new(2))
            .times(1)
            .return_once(|_| Ok(vec![entry()]));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(user_timeline),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/usertimeline")
            .insert_header(AUTH_HEADER)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["id"], 8);
    }
}
