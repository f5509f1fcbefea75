//! Test helpers for inbound HTTP components.

use actix_web::http::header::AUTHORIZATION;
use std::sync::Arc;

use crate::domain::ports::{
    MockAccountService, MockCapsuleContentService, MockCapsuleService, MockDiscussionService,
    MockLookupQuery, MockPredictionService, MockStoryService, MockTimelineService,
};
use crate::domain::{AccountId, ProfileId, UserProfile};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Header pair sent by tests that need an authenticated caller.
pub const AUTH_HEADER: (actix_web::http::header::HeaderName, &str) =
    (AUTHORIZATION, "Token test-key");

/// Profile with the given id and an account id to match.
pub fn profile(id: i64) -> UserProfile {
    UserProfile {
        id: ProfileId::new(id),
        account_id: AccountId::new(id),
        bio: String::new(),
        location_x: 0.0,
        location_y: 0.0,
    }
}

/// Mock driving ports; set expectations, then call [`MockPorts::into_state`].
pub struct MockPorts {
    pub accounts: MockAccountService,
    pub lookups: MockLookupQuery,
    pub capsules: MockCapsuleService,
    pub capsule_contents: MockCapsuleContentService,
    pub stories: MockStoryService,
    pub predictions: MockPredictionService,
    pub discussions: MockDiscussionService,
    pub timeline: MockTimelineService,
}

impl Default for MockPorts {
    fn default() -> Self {
        Self {
            accounts: MockAccountService::new(),
            lookups: MockLookupQuery::new(),
            capsules: MockCapsuleService::new(),
            capsule_contents: MockCapsuleContentService::new(),
            stories: MockStoryService::new(),
            predictions: MockPredictionService::new(),
            discussions: MockDiscussionService::new(),
            timeline: MockTimelineService::new(),
        }
    }
}

impl MockPorts {
    /// Ports whose account service resolves any token to `caller`.
    pub fn signed_in(caller: UserProfile) -> Self {
        let mut ports = Self::default();
        ports
            .accounts
            .expect_authenticate()
            .returning(move |_| Ok(caller.clone()));
        ports
    }

    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            lookups: Arc::new(self.lookups),
            capsules: Arc::new(self.capsules),
            capsule_contents: Arc::new(self.capsule_contents),
            stories: Arc::new(self.stories),
            predictions: Arc::new(self.predictions),
            discussions: Arc::new(self.discussions),
            timeline: Arc::new(self.timeline),
        })
    }
}
