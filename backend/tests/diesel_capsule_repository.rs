//! Integration tests for the Diesel capsule and capsule content repositories.

#[path = "support/database.rs"]
mod database_support;

use rstest::rstest;
use timecapsule::domain::CapsuleContentFilter;
use timecapsule::domain::ports::{CapsuleContentRepository, CapsuleRepository};
use timecapsule::outbound::persistence::{DieselCapsuleContentRepository, DieselCapsuleRepository};

use database_support::{
    TestDatabase, at, database, seed_capsule, seed_content, seed_profile, skip,
};

#[rstest]
fn creator_listing_is_newest_first_with_id_tiebreak(database: Option<TestDatabase>) {
    let Some(db) = database else {
        skip("creator_listing_is_newest_first_with_id_tiebreak");
        return;
    };
    let repository = DieselCapsuleRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let creator = seed_profile(&db.pool).await;
        let oldest = seed_capsule(&db.pool, &creator, at(10)).await;
        let tied_first = seed_capsule(&db.pool, &creator, at(20)).await;
        let tied_second = seed_capsule(&db.pool, &creator, at(20)).await;

        let listed = repository
            .list_by_creator(creator.id)
            .await
            .expect("list by creator");
        let ids: Vec<_> = listed.iter().map(|capsule| capsule.id).collect();
        assert_eq!(ids, vec![tied_second.id, tied_first.id, oldest.id]);

        let all = repository.list().await.expect("list all");
        let positions: Vec<_> = [oldest.id, tied_first.id, tied_second.id]
            .iter()
            .map(|id| all.iter().position(|capsule| capsule.id == *id))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    });
}

#[rstest]
fn update_and_delete_report_missing_rows(database: Option<TestDatabase>) {
    let Some(db) = database else {
        skip("update_and_delete_report_missing_rows");
        return;
    };
    let capsules = DieselCapsuleRepository::new(db.pool.clone());
    let contents = DieselCapsuleContentRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let creator = seed_profile(&db.pool).await;
        let mut capsule = seed_capsule(&db.pool, &creator, at(0)).await;
        let content = seed_content(&db.pool, &capsule).await;

        capsule.title = "renamed".to_owned();
        assert!(capsules.update(&capsule).await.expect("update"));
        let stored = capsules
            .find(capsule.id)
            .await
            .expect("find")
            .expect("capsule exists");
        assert_eq!(stored, capsule);

        assert!(capsules.delete(capsule.id).await.expect("delete"));
        assert!(!capsules.delete(capsule.id).await.expect("second delete"));
        assert!(!capsules.update(&capsule).await.expect("update after delete"));
        let orphan = contents.find(content.id).await.expect("find content");
        assert!(orphan.is_none(), "content is removed with its capsule");
    });
}

#[rstest]
fn content_update_can_clear_media_url(database: Option<TestDatabase>) {
    let Some(db) = database else {
        skip("content_update_can_clear_media_url");
        return;
    };
    let contents = DieselCapsuleContentRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let creator = seed_profile(&db.pool).await;
        let capsule = seed_capsule(&db.pool, &creator, at(0)).await;
        let mut content = seed_content(&db.pool, &capsule).await;
        assert!(content.media_url.is_some());

        content.media_url = None;
        assert!(contents.update(&content).await.expect("update"));

        let listed = contents
            .list(&CapsuleContentFilter {
                capsule: Some(capsule.id),
                content_type: None,
            })
            .await
            .expect("list content");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].media_url, None);
    });
}
