//! Integration tests for `DieselPredictionRepository`.

#[path = "support/database.rs"]
mod database_support;

use rstest::rstest;
use timecapsule::domain::ports::PredictionRepository;
use timecapsule::domain::{LookupKind, NewPrediction, PredictionFilter};
use timecapsule::outbound::persistence::DieselPredictionRepository;

use database_support::{
    TestDatabase, at, database, lookup_id, seed_capsule, seed_content, seed_profile, skip,
    unique,
};

#[rstest]
fn verification_round_trips_and_category_clears(database: Option<TestDatabase>) {
    let Some(db) = database else {
        skip("verification_round_trips_and_category_clears");
        return;
    };
    let predictions = DieselPredictionRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let creator = seed_profile(&db.pool).await;
        let verifier = seed_profile(&db.pool).await;
        let capsule = seed_capsule(&db.pool, &creator, at(0)).await;
        let content = seed_content(&db.pool, &capsule).await;
        let pending = lookup_id(&db.pool, LookupKind::VerificationStatus, "pending").await;
        let verified = lookup_id(&db.pool, LookupKind::VerificationStatus, "verified").await;
        let category = unique("weather");

        let mut prediction = predictions
            .insert(&NewPrediction {
                capsule_content: content.id,
                prediction_text: "snow in July".to_owned(),
                category: Some(category.clone()),
                verification_status: pending,
                created_at: at(1),
            })
            .await
            .expect("insert prediction");
        assert_eq!(prediction.verification_user, None);

        let by_category = predictions
            .list(&PredictionFilter {
                category: Some(category),
                ..PredictionFilter::default()
            })
            .await
            .expect("list by category");
        assert_eq!(by_category, vec![prediction.clone()]);

        prediction.category = None;
        prediction.verification_status = verified;
        prediction.verification_user = Some(verifier.id);
        prediction.verification_date = Some(at(2));
        assert!(predictions.update(&prediction).await.expect("update"));

        let stored = predictions
            .find(prediction.id)
            .await
            .expect("find")
            .expect("prediction exists");
        assert_eq!(stored, prediction);

        let by_verifier = predictions
            .list(&PredictionFilter {
                verified_by: Some(verifier.id),
                ..PredictionFilter::default()
            })
            .await
            .expect("list by verifier");
        assert_eq!(by_verifier, vec![prediction]);
    });
}

#[rstest]
fn delete_reports_missing_predictions(database: Option<TestDatabase>) {
    let Some(db) = database else {
        skip("delete_reports_missing_predictions");
        return;
    };
    let predictions = DieselPredictionRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let creator = seed_profile(&db.pool).await;
        let capsule = seed_capsule(&db.pool, &creator, at(0)).await;
        let content = seed_content(&db.pool, &capsule).await;
        let pending = lookup_id(&db.pool, LookupKind::VerificationStatus, "pending").await;
        let prediction = predictions
            .insert(&NewPrediction {
                capsule_content: content.id,
                prediction_text: "the river freezes".to_owned(),
                category: None,
                verification_status: pending,
                created_at: at(1),
            })
            .await
            .expect("insert prediction");

        assert!(predictions.delete(prediction.id).await.expect("delete"));
        assert!(!predictions.delete(prediction.id).await.expect("second delete"));
        assert!(!predictions.update(&prediction).await.expect("update after delete"));
    });
}
