//! Tests for capsule and capsule content services.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    CapsuleRepositoryError, MockCapsuleContentRepository, MockCapsuleRepository,
    MockLookupRepository,
};
use crate::domain::service_test_helpers::{
    capsule, content, fixture_clock, fixture_timestamp, lookup,
};
use crate::domain::{ErrorCode, LookupId, ProfileId};

fn create_request() -> CreateCapsuleRequest {
    CreateCapsuleRequest {
        creator: ProfileId::new(7),
        status: LookupId::new(1),
        capsule_type: LookupId::new(2),
        title: "Class of 2030".to_owned(),
        descriptions: "Letters to our future selves".to_owned(),
        opening_date: Utc
            .with_ymd_and_hms(2040, 1, 1, 0, 0, 0)
            .single()
            .expect("valid date"),
        location_x: 51.5,
        location_y: -0.12,
    }
}

fn lookups_with(status_exists: bool, type_exists: bool) -> MockLookupRepository {
    let mut lookups = MockLookupRepository::new();
    lookups.expect_find().returning(move |kind, id| {
        let exists = match kind {
            LookupKind::CapsuleStatus => status_exists,
            LookupKind::CapsuleType => type_exists,
            _ => true,
        };
        Ok(exists.then(|| lookup(id.get(), "row")))
    });
    lookups
}

fn capsule_service(repo: MockCapsuleRepository, lookups: MockLookupRepository) -> Capsules {
    Capsules::new(Arc::new(repo), Arc::new(lookups), fixture_clock())
}

#[rstest]
#[tokio::test]
async fn create_stamps_creator_and_clock() {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_insert()
        .withf(|new| {
            new.creator == ProfileId::new(7)
                && new.created_at == fixture_timestamp()
                && new.title == "Class of 2030"
        })
        .times(1)
        .returning(|new| Ok(new.clone().into_capsule(CapsuleId::new(11))));

    let service = capsule_service(repo, lookups_with(true, true));
    let created = service
        .create(create_request())
        .await
        .expect("create succeeds");

    assert_eq!(created.id, CapsuleId::new(11));
    assert_eq!(created.capsule_type, LookupId::new(2));
}

#[rstest]
#[case(false, true, "Invalid capsule status id sent")]
#[case(true, false, "Invalid capsule type id sent")]
#[case(false, false, "Invalid capsule status id sent")]
#[tokio::test]
async fn create_rejects_unknown_lookups(
    #[case] status_exists: bool,
    #[case] type_exists: bool,
    #[case] reason: &str,
) {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_insert().times(0);

    let service = capsule_service(repo, lookups_with(status_exists, type_exists));
    let err = service
        .create(create_request())
        .await
        .expect_err("unknown lookup");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.reason(), reason);
}

#[rstest]
#[tokio::test]
async fn create_rejects_overlong_title_before_lookups() {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_insert().times(0);
    let mut lookups = MockLookupRepository::new();
    lookups.expect_find().times(0);
    let mut request = create_request();
    request.title = "t".repeat(CAPSULE_TITLE_MAX_CHARS + 1);

    let service = capsule_service(repo, lookups);
    let err = service.create(request).await.expect_err("too long");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn get_missing_capsule_is_not_found() {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_find().times(1).return_once(|_| Ok(None));

    let service = capsule_service(repo, MockLookupRepository::new());
    let err = service.get(CapsuleId::new(3)).await.expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_keeps_lookups_when_absent() {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_find()
        .times(1)
        .return_once(|_| Ok(Some(capsule(3, 7))));
    repo.expect_update()
        .withf(|stored| {
            stored.status == LookupId::new(1)
                && stored.capsule_type == LookupId::new(1)
                && stored.title == "renamed"
        })
        .times(1)
        .return_once(|_| Ok(true));

    let mut lookups = MockLookupRepository::new();
    lookups.expect_find().times(0);

    let service = capsule_service(repo, lookups);
    service
        .update(UpdateCapsuleRequest {
            id: CapsuleId::new(3),
            status: None,
            capsule_type: None,
            title: Some("renamed".to_owned()),
            descriptions: Some("new".to_owned()),
            opening_date: Some(fixture_timestamp()),
            location_x: Some(0.0),
            location_y: Some(0.0),
        })
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn update_validates_supplied_status() {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_find()
        .times(1)
        .return_once(|_| Ok(Some(capsule(3, 7))));
    repo.expect_update().times(0);

    let service = capsule_service(repo, lookups_with(false, true));
    let err = service
        .update(UpdateCapsuleRequest {
            id: CapsuleId::new(3),
            status: Some(LookupId::new(99)),
            capsule_type: None,
            title: Some("renamed".to_owned()),
            descriptions: Some("new".to_owned()),
            opening_date: Some(fixture_timestamp()),
            location_x: Some(0.0),
            location_y: Some(0.0),
        })
        .await
        .expect_err("unknown status");

    assert_eq!(err.reason(), "Invalid capsule status id sent");
}

fn empty_update(id: i64) -> UpdateCapsuleRequest {
    UpdateCapsuleRequest {
        id: CapsuleId::new(id),
        status: Some(LookupId::new(99)),
        capsule_type: None,
        title: None,
        descriptions: None,
        opening_date: None,
        location_x: None,
        location_y: None,
    }
}

#[rstest]
#[tokio::test]
async fn update_of_missing_capsule_is_not_found_before_body_checks() {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_find().times(1).return_once(|_| Ok(None));
    repo.expect_update().times(0);

    let service = capsule_service(repo, MockLookupRepository::new());
    let err = service.update(empty_update(404)).await.expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.reason(), "Time capsule not found");
}

#[rstest]
#[tokio::test]
async fn update_names_missing_fields_before_lookups() {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_find()
        .times(1)
        .return_once(|_| Ok(Some(capsule(3, 7))));
    repo.expect_update().times(0);
    let mut lookups = MockLookupRepository::new();
    lookups.expect_find().times(0);

    let service = capsule_service(repo, lookups);
    let err = service.update(empty_update(3)).await.expect_err("no title");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("field")),
        Some(&serde_json::json!("title"))
    );
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_missing_rows(#[case] deleted: bool, #[case] expected: Option<ErrorCode>) {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(move |_| Ok(deleted));

    let service = capsule_service(repo, MockLookupRepository::new());
    let result = service.delete(CapsuleId::new(3)).await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn connection_failures_surface_as_service_unavailable() {
    let mut repo = MockCapsuleRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Err(CapsuleRepositoryError::connection("pool exhausted")));

    let service = capsule_service(repo, MockLookupRepository::new());
    let err = service.list().await.expect_err("connection failure");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

fn content_service(
    contents: MockCapsuleContentRepository,
    capsules: MockCapsuleRepository,
    lookups: MockLookupRepository,
) -> CapsuleContents {
    CapsuleContents::new(
        Arc::new(contents),
        Arc::new(capsules),
        Arc::new(lookups),
        fixture_clock(),
    )
}

#[rstest]
#[tokio::test]
async fn content_create_expands_capsule_and_type() {
    let mut contents = MockCapsuleContentRepository::new();
    contents
        .expect_insert()
        .times(1)
        .returning(|new| Ok(new.clone().into_content(CapsuleContentId::new(5))));
    let mut capsules = MockCapsuleRepository::new();
    capsules
        .expect_find()
        .returning(|id| Ok(Some(capsule(id.get(), 7))));
    let mut lookups = MockLookupRepository::new();
    lookups
        .expect_find()
        .returning(|_, id| Ok(Some(lookup(id.get(), "text"))));

    let service = content_service(contents, capsules, lookups);
    let detail = service
        .create(CreateCapsuleContentRequest {
            capsule: CapsuleId::new(2),
            content_type: LookupId::new(1),
            content: "hello".to_owned(),
            media_url: Some("https://example.test/a.png".to_owned()),
        })
        .await
        .expect("create succeeds");

    assert_eq!(detail.content.id, CapsuleContentId::new(5));
    assert_eq!(detail.capsule.id, CapsuleId::new(2));
    assert_eq!(detail.content_type.name, "text");
    assert_eq!(detail.content.created_at, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn content_create_checks_capsule_before_type() {
    let mut contents = MockCapsuleContentRepository::new();
    contents.expect_insert().times(0);
    let mut capsules = MockCapsuleRepository::new();
    capsules.expect_find().returning(|_| Ok(None));
    let mut lookups = MockLookupRepository::new();
    lookups.expect_find().times(0);

    let service = content_service(contents, capsules, lookups);
    let err = service
        .create(CreateCapsuleContentRequest {
            capsule: CapsuleId::new(2),
            content_type: LookupId::new(1),
            content: "hello".to_owned(),
            media_url: None,
        })
        .await
        .expect_err("missing capsule");

    assert_eq!(err.reason(), "Invalid capsule id sent");
}

#[rstest]
#[case(None, Some("https://example.test/old.png"))]
#[case(Some(None), None)]
#[case(Some(Some("https://example.test/new.png")), Some("https://example.test/new.png"))]
#[tokio::test]
async fn content_update_applies_media_url_tri_state(
    #[case] supplied: Option<Option<&'static str>>,
    #[case] expected: Option<&'static str>,
) {
    let mut contents = MockCapsuleContentRepository::new();
    contents.expect_find().times(1).return_once(|_| {
        let mut row = content(5, 2);
        row.media_url = Some("https://example.test/old.png".to_owned());
        Ok(Some(row))
    });
    contents
        .expect_update()
        .withf(move |row| row.media_url.as_deref() == expected && row.content == "edited")
        .times(1)
        .return_once(|_| Ok(true));

    let service = content_service(
        contents,
        MockCapsuleRepository::new(),
        MockLookupRepository::new(),
    );
    service
        .update(UpdateCapsuleContentRequest {
            id: CapsuleContentId::new(5),
            capsule: None,
            content_type: None,
            content: Some("edited".to_owned()),
            media_url: supplied.map(|url| url.map(str::to_owned)),
        })
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn content_update_requires_content_once_found() {
    let mut contents = MockCapsuleContentRepository::new();
    contents
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(content(5, 2))));
    contents.expect_update().times(0);
    let mut capsules = MockCapsuleRepository::new();
    capsules.expect_find().times(0);

    let service = content_service(contents, capsules, MockLookupRepository::new());
    let err = service
        .update(UpdateCapsuleContentRequest {
            id: CapsuleContentId::new(5),
            capsule: Some(CapsuleId::new(404)),
            content_type: None,
            content: None,
            media_url: None,
        })
        .await
        .expect_err("no content");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
