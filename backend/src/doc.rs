//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler in the inbound HTTP layer, the JSON
//! bodies they exchange, and the `Authorization: Token <key>` scheme. The
//! document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::accounts::{LoginRequest, RegisterRequest, TokenBody};
use crate::inbound::http::capsule_contents::{CapsuleContentBody, CapsuleContentRequestBody};
use crate::inbound::http::capsules::CapsuleRequestBody;
use crate::inbound::http::discussions::{
    CommentBody, CommentRequestBody, ThreadBody, ThreadRequestBody,
};
use crate::inbound::http::predictions::{
    AccuracyStatsBody, PredictionBody, PredictionRequestBody, PredictionStatisticsBody,
    VerifyRequestBody,
};
use crate::inbound::http::schemas::{
    CapsuleBody, ErrorCodeSchema, ErrorSchema, LookupBody, NestedCapsuleBody, NestedContentBody,
    NestedNodeBody, NestedThreadBody, ProfileBody,
};
use crate::inbound::http::stories::{
    StoryChoiceBody, StoryChoiceRequestBody, StoryNodeBody, StoryNodeRequestBody,
};
use crate::inbound::http::timeline::{AchievementBody, TimelineEntryBody, TimelineStatisticsBody};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the token security scheme referenced by every guarded path.
pub const TOKEN_AUTH: &str = "TokenAuth";

/// Enrich the generated document with the token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            TOKEN_AUTH,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Token <key> issued by POST /register or POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Time capsule API",
        description = "Create time capsules, attach content, branching stories, predictions, and discussions, and browse a personal timeline."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenAuth" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::capsules::list_capsules,
        crate::inbound::http::capsules::get_capsule,
        crate::inbound::http::capsules::create_capsule,
        crate::inbound::http::capsules::update_capsule,
        crate::inbound::http::capsules::delete_capsule,
        crate::inbound::http::capsule_contents::list_capsule_contents,
        crate::inbound::http::capsule_contents::get_capsule_content,
        crate::inbound::http::capsule_contents::create_capsule_content,
        crate::inbound::http::capsule_contents::update_capsule_content,
        crate::inbound::http::capsule_contents::delete_capsule_content,
        crate::inbound::http::stories::list_story_nodes,
        crate::inbound::http::stories::get_story_node,
        crate::inbound::http::stories::create_story_node,
        crate::inbound::http::stories::update_story_node,
        crate::inbound::http::stories::delete_story_node,
        crate::inbound::http::stories::list_story_choices,
        crate::inbound::http::stories::get_story_choice,
        crate::inbound::http::stories::create_story_choice,
        crate::inbound::http::stories::update_story_choice,
        crate::inbound::http::stories::delete_story_choice,
        crate::inbound::http::predictions::list_predictions,
        crate::inbound::http::predictions::get_prediction,
        crate::inbound::http::predictions::create_prediction,
        crate::inbound::http::predictions::update_prediction,
        crate::inbound::http::predictions::delete_prediction,
        crate::inbound::http::predictions::verify_prediction,
        crate::inbound::http::predictions::prediction_statistics,
        crate::inbound::http::discussions::list_threads,
        crate::inbound::http::discussions::get_thread,
        crate::inbound::http::discussions::create_thread,
        crate::inbound::http::discussions::update_thread,
        crate::inbound::http::discussions::delete_thread,
        crate::inbound::http::discussions::list_comments,
        crate::inbound::http::discussions::get_comment,
        crate::inbound::http::discussions::create_comment,
        crate::inbound::http::discussions::update_comment,
        crate::inbound::http::discussions::delete_comment,
        crate::inbound::http::timeline::user_timeline,
        crate::inbound::http::timeline::timeline_statistics,
        crate::inbound::http::timeline::discovery_history,
        crate::inbound::http::lookups::list_capsule_statuses,
        crate::inbound::http::lookups::get_capsule_status,
        crate::inbound::http::lookups::list_capsule_types,
        crate::inbound::http::lookups::get_capsule_type,
        crate::inbound::http::lookups::list_verification_statuses,
        crate::inbound::http::lookups::get_verification_status,
        crate::inbound::http::lookups::list_content_types,
        crate::inbound::http::lookups::get_content_type,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        RegisterRequest,
        TokenBody,
        LookupBody,
        ProfileBody,
        CapsuleRequestBody,
        CapsuleBody,
        NestedCapsuleBody,
        CapsuleContentRequestBody,
        CapsuleContentBody,
        NestedContentBody,
        StoryNodeRequestBody,
        StoryNodeBody,
        NestedNodeBody,
        StoryChoiceRequestBody,
        StoryChoiceBody,
        PredictionRequestBody,
        VerifyRequestBody,
        PredictionBody,
        AccuracyStatsBody,
        PredictionStatisticsBody,
        ThreadRequestBody,
        ThreadBody,
        NestedThreadBody,
        CommentRequestBody,
        CommentBody,
        TimelineEntryBody,
        AchievementBody,
        TimelineStatisticsBody,
    )),
    tags(
        (name = "accounts", description = "Registration and token login"),
        (name = "capsules", description = "Time capsules"),
        (name = "capsule contents", description = "Content attached to a capsule"),
        (name = "stories", description = "Branching story nodes and choices"),
        (name = "predictions", description = "Predictions and their verification"),
        (name = "discussions", description = "Discussion threads and comments"),
        (name = "timeline", description = "The caller's capsule timeline"),
        (name = "lookups", description = "Read-only reference tables"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "reason");
    }

    #[test]
    fn token_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(TOKEN_AUTH));
    }

    #[rstest]
    #[case("/register")]
    #[case("/capsules/{id}")]
    #[case("/capsulecontents")]
    #[case("/storynodes")]
    #[case("/storychoices/{id}")]
    #[case("/predictions/{id}/verify")]
    #[case("/predictions/statistics")]
    #[case("/discussionthreads")]
    #[case("/discussioncomments/{id}")]
    #[case("/usertimeline/statistics")]
    #[case("/verificationstatuses")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
