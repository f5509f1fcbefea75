//! Tests for the prediction service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockAccountRepository, MockCapsuleContentRepository, MockLookupRepository,
    MockPredictionRepository,
};
use crate::domain::service_test_helpers::{
    content, fixture_clock, fixture_timestamp, lookup, prediction, profile,
};
use crate::domain::{ErrorCode, LookupId, ProfileId};

fn contents_present() -> MockCapsuleContentRepository {
    let mut contents = MockCapsuleContentRepository::new();
    contents
        .expect_find()
        .returning(|id| Ok(Some(content(id.get(), 1))));
    contents
}

fn verification_statuses() -> MockLookupRepository {
    let rows = [lookup(1, "pending"), lookup(2, "verified"), lookup(3, "disproved")];
    let by_id = rows.clone();
    let by_name = rows.clone();
    let mut lookups = MockLookupRepository::new();
    lookups
        .expect_find()
        .returning(move |_, id| Ok(by_id.iter().find(|row| row.id == id).cloned()));
    lookups
        .expect_find_by_name()
        .returning(move |_, name| Ok(by_name.iter().find(|row| row.name == name).cloned()));
    lookups
        .expect_list()
        .returning(move |_| Ok(rows.to_vec()));
    lookups
}

fn accounts_present() -> MockAccountRepository {
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_find_profile()
        .returning(|id| Ok(Some(profile(id.get()))));
    accounts
}

fn service(predictions: MockPredictionRepository, lookups: MockLookupRepository) -> Predictions {
    Predictions::new(
        Arc::new(predictions),
        Arc::new(contents_present()),
        Arc::new(lookups),
        Arc::new(accounts_present()),
        fixture_clock(),
    )
}

#[rstest]
#[tokio::test]
async fn create_starts_pending() {
    let mut predictions = MockPredictionRepository::new();
    predictions
        .expect_insert()
        .withf(|new| new.verification_status == LookupId::new(1))
        .times(1)
        .returning(|new| Ok(new.clone().into_prediction(PredictionId::new(4))));

    let detail = service(predictions, verification_statuses())
        .create(CreatePredictionRequest {
            capsule_content: CapsuleContentId::new(1),
            prediction_text: "it will snow in July".to_owned(),
            category: Some("weather".to_owned()),
        })
        .await
        .expect("create succeeds");

    assert_eq!(detail.verification_status.name, "pending");
    assert!(detail.verification_user.is_none());
    assert!(detail.prediction.verification_date.is_none());
}

#[rstest]
#[tokio::test]
async fn create_fails_without_pending_status() {
    let mut lookups = MockLookupRepository::new();
    lookups.expect_find_by_name().returning(|_, _| Ok(None));
    let mut predictions = MockPredictionRepository::new();
    predictions.expect_insert().times(0);

    let err = service(predictions, lookups)
        .create(CreatePredictionRequest {
            capsule_content: CapsuleContentId::new(1),
            prediction_text: "nothing to verify".to_owned(),
            category: None,
        })
        .await
        .expect_err("no pending status");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.reason(), "Verification status 'pending' not found");
}

#[rstest]
#[tokio::test]
async fn create_rejects_overlong_category_before_lookups() {
    let mut predictions = MockPredictionRepository::new();
    predictions.expect_insert().times(0);
    let mut contents = MockCapsuleContentRepository::new();
    contents.expect_find().times(0);
    let mut lookups = MockLookupRepository::new();
    lookups.expect_find_by_name().times(0);

    let err = Predictions::new(
        Arc::new(predictions),
        Arc::new(contents),
        Arc::new(lookups),
        Arc::new(accounts_present()),
        fixture_clock(),
    )
    .create(CreatePredictionRequest {
        capsule_content: CapsuleContentId::new(404),
        prediction_text: "x".to_owned(),
        category: Some("c".repeat(CATEGORY_MAX_CHARS + 1)),
    })
    .await
    .expect_err("category too long");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn verify_stamps_caller_and_clock() {
    let mut predictions = MockPredictionRepository::new();
    predictions
        .expect_find()
        .returning(|id| Ok(Some(prediction(id.get(), 1))));
    predictions
        .expect_update()
        .withf(|stored| {
            stored.verification_status == LookupId::new(2)
                && stored.verification_user == Some(ProfileId::new(42))
                && stored.verification_date == Some(fixture_timestamp())
        })
        .times(1)
        .return_once(|_| Ok(true));

    service(predictions, verification_statuses())
        .verify(VerifyPredictionRequest {
            id: PredictionId::new(4),
            verification_status: Some(LookupId::new(2)),
            verifier: ProfileId::new(42),
        })
        .await
        .expect("verify succeeds");
}

#[rstest]
#[case(None, ErrorCode::InvalidRequest)]
#[case(Some(99), ErrorCode::NotFound)]
#[tokio::test]
async fn verify_rejects_bad_status(#[case] status: Option<i64>, #[case] expected: ErrorCode) {
    let mut predictions = MockPredictionRepository::new();
    predictions
        .expect_find()
        .returning(|id| Ok(Some(prediction(id.get(), 1))));
    predictions.expect_update().times(0);

    let err = service(predictions, verification_statuses())
        .verify(VerifyPredictionRequest {
            id: PredictionId::new(4),
            verification_status: status.map(LookupId::new),
            verifier: ProfileId::new(42),
        })
        .await
        .expect_err("bad status");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn verify_checks_prediction_before_body() {
    let mut predictions = MockPredictionRepository::new();
    predictions.expect_find().returning(|_| Ok(None));

    let err = service(predictions, verification_statuses())
        .verify(VerifyPredictionRequest {
            id: PredictionId::new(4),
            verification_status: None,
            verifier: ProfileId::new(42),
        })
        .await
        .expect_err("missing prediction");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_never_touches_verification_fields() {
    let mut predictions = MockPredictionRepository::new();
    predictions.expect_find().returning(|id| {
        let mut row = prediction(id.get(), 2);
        row.verification_user = Some(ProfileId::new(8));
        row.verification_date = Some(fixture_timestamp());
        row.category = Some("sport".to_owned());
        Ok(Some(row))
    });
    predictions
        .expect_update()
        .withf(|stored| {
            stored.verification_status == LookupId::new(2)
                && stored.verification_user == Some(ProfileId::new(8))
                && stored.category.is_none()
                && stored.prediction_text == "revised"
        })
        .times(1)
        .return_once(|_| Ok(true));

    service(predictions, verification_statuses())
        .update(UpdatePredictionRequest {
            id: PredictionId::new(4),
            capsule_content: None,
            prediction_text: Some("revised".to_owned()),
            category: Some(None),
        })
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn statistics_tallies_every_prediction() {
    let mut predictions = MockPredictionRepository::new();
    predictions.expect_list().times(1).return_once(|_| {
        Ok(vec![
            prediction(1, 2),
            prediction(2, 2),
            prediction(3, 2),
            prediction(4, 3),
        ])
    });

    let stats = service(predictions, verification_statuses())
        .statistics()
        .await
        .expect("statistics succeed");

    assert_eq!(stats.verification_stats.get("pending"), Some(&0));
    assert_eq!(stats.accuracy_stats.total_verified, 4);
    assert!((stats.accuracy_stats.accuracy_percentage - 75.0).abs() < f64::EPSILON);
}

#[rstest]
#[case(None, ErrorCode::NotFound)]
#[case(Some(4), ErrorCode::InvalidRequest)]
#[tokio::test]
async fn update_resolves_the_prediction_before_requiring_text(
    #[case] stored: Option<i64>,
    #[case] expected: ErrorCode,
) {
    let mut predictions = MockPredictionRepository::new();
    predictions
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(stored.map(|id| prediction(id, 1))));
    predictions.expect_update().times(0);

    let err = service(predictions, MockLookupRepository::new())
        .update(UpdatePredictionRequest {
            id: PredictionId::new(4),
            capsule_content: None,
            prediction_text: None,
            category: None,
        })
        .await
        .expect_err("rejected");

    assert_eq!(err.code(), expected);
}
