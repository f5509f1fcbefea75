//! Token authentication for HTTP handlers.
//!
//! Handlers that need an identity take a [`Caller`] argument. The extractor
//! reads `Authorization: Token <key>` and resolves the key through the
//! account service held in [`HttpState`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthToken, Error, ProfileId, UserProfile};
use crate::inbound::http::state::HttpState;

const TOKEN_KEYWORD: &str = "token";

/// Authenticated caller resolved from the request's token.
#[derive(Debug, Clone, PartialEq)]
pub struct Caller(UserProfile);

impl Caller {
    #[cfg(test)]
    pub(crate) fn from_profile(profile: UserProfile) -> Self {
        Self(profile)
    }

    /// Profile of the authenticated caller.
    pub fn profile(&self) -> &UserProfile {
        &self.0
    }

    /// Profile id of the authenticated caller.
    pub fn id(&self) -> ProfileId {
        self.0.id
    }
}

/// Extract the key from an `Authorization` header value.
///
/// The keyword is matched case-insensitively and must be followed by exactly
/// one non-empty key.
pub(crate) fn token_from_header(value: &str) -> Option<AuthToken> {
    let mut parts = value.split_whitespace();
    let keyword = parts.next()?;
    let key = parts.next()?;
    if parts.next().is_some() || !keyword.eq_ignore_ascii_case(TOKEN_KEYWORD) {
        return None;
    }
    Some(AuthToken::new(key))
}

fn presented_token(req: &HttpRequest) -> Result<AuthToken, Error> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(token_from_header)
        .ok_or_else(|| Error::unauthorized("authentication required"))
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = presented_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let profile = state.accounts.authenticate(&token).await?;
            Ok(Caller(profile))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockAccountService, MockCapsuleContentService, MockCapsuleService, MockDiscussionService,
        MockLookupQuery, MockPredictionService, MockStoryService, MockTimelineService,
    };
    use crate::domain::AccountId;
    use crate::inbound::http::state::HttpStatePorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    const KEY: &str = "0123456789abcdef0123456789abcdef01234567";

    fn state_with(accounts: MockAccountService) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(accounts),
            lookups: Arc::new(MockLookupQuery::new()),
            capsules: Arc::new(MockCapsuleService::new()),
            capsule_contents: Arc::new(MockCapsuleContentService::new()),
            stories: Arc::new(MockStoryService::new()),
            predictions: Arc::new(MockPredictionService::new()),
            discussions: Arc::new(MockDiscussionService::new()),
            timeline: Arc::new(MockTimelineService::new()),
        })
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: ProfileId::new(7),
            account_id: AccountId::new(3),
            bio: String::new(),
            location_x: 0.0,
            location_y: 0.0,
        }
    }

    async fn whoami(caller: Caller) -> HttpResponse {
        HttpResponse::Ok().body(caller.id().to_string())
    }

    #[rstest]
    #[case("Token abc", Some("abc"))]
    #[case("token abc", Some("abc"))]
    #[case("  Token   abc  ", Some("abc"))]
    #[case("Bearer abc", None)]
    #[case("Token", None)]
    #[case("Token abc def", None)]
    #[case("", None)]
    fn parses_token_header(#[case] header: &str, #[case] expected: Option<&str>) {
        let parsed = token_from_header(header);
        assert_eq!(parsed.as_ref().map(AuthToken::as_str), expected);
    }

    #[actix_web::test]
    async fn resolves_known_tokens() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_authenticate()
            .withf(|token| token.as_str() == KEY)
            .times(1)
            .return_once(|_| Ok(profile()));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(accounts)))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/me")
            .insert_header((AUTHORIZATION, format!("Token {KEY}")))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        assert_eq!(body.as_ref(), b"7");
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorised() {
        let mut accounts = MockAccountService::new();
        accounts.expect_authenticate().never();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(accounts)))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let request = actix_test::TestRequest::get().uri("/me").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["reason"], "authentication required");
    }

    #[actix_web::test]
    async fn unknown_tokens_are_rejected() {
        let mut accounts = MockAccountService::new();
        accounts
            .expect_authenticate()
            .return_once(|_| Err(Error::unauthorized("invalid token")));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(accounts)))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/me")
            .insert_header((AUTHORIZATION, "Token nope"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["reason"], "invalid token");
    }
}
