//! Integration tests for the design record store.
//!
//! Each test runs against its own freshly migrated SQLite database.

use std::collections::HashSet;

use assert_matches::assert_matches;
use fashionsd_core::design::{DesignPatch, NewDesign};
use fashionsd_core::error::CoreError;
use fashionsd_db::repositories::DesignRepo;
use fashionsd_db::StoreError;
use sqlx::SqlitePool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_design(prompt: &str) -> NewDesign {
    NewDesign {
        prompt: prompt.to_string(),
        negative_prompt: "bad quality".to_string(),
        width: 512,
        height: 512,
        file_path: "/path/to/image.png".to_string(),
    }
}

// ---------------------------------------------------------------------------
// create / find
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_assigns_unique_ids(pool: SqlitePool) {
    let mut ids = HashSet::new();
    for i in 0..5 {
        let design = DesignRepo::create(&pool, &new_design(&format!("Design {i}")))
            .await
            .unwrap();
        assert!(!design.id.is_nil());
        assert!(ids.insert(design.id), "ids must be unique");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_then_find_returns_stored_fields(pool: SqlitePool) {
    let input = new_design("A beautiful dress");
    let created = DesignRepo::create(&pool, &input).await.unwrap();

    let found = DesignRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("design should exist");

    assert_eq!(found.id, created.id);
    assert_eq!(found.fields(), input);
    assert_eq!(found.created_at, created.created_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn find_unknown_id_returns_none(pool: SqlitePool) {
    let found = DesignRepo::find_by_id(&pool, Uuid::new_v4()).await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn find_by_prompt_matches_exactly(pool: SqlitePool) {
    DesignRepo::create(&pool, &new_design("Red coat")).await.unwrap();
    DesignRepo::create(&pool, &new_design("Red coat")).await.unwrap();
    DesignRepo::create(&pool, &new_design("Red coat with hood"))
        .await
        .unwrap();

    let found = DesignRepo::find_by_prompt(&pool, "Red coat").await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|d| d.prompt == "Red coat"));

    let none = DesignRepo::find_by_prompt(&pool, "red coat").await.unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_returns_every_design(pool: SqlitePool) {
    assert!(DesignRepo::list(&pool).await.unwrap().is_empty());

    DesignRepo::create(&pool, &new_design("One")).await.unwrap();
    DesignRepo::create(&pool, &new_design("Two")).await.unwrap();

    let all = DesignRepo::list(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn search_empty_term_is_rejected(pool: SqlitePool) {
    let result = DesignRepo::search(&pool, "").await;
    assert_matches!(result, Err(StoreError::Invalid(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn search_whitespace_term_matches_literally(pool: SqlitePool) {
    DesignRepo::create(&pool, &new_design("Beautiful dress"))
        .await
        .unwrap();
    DesignRepo::create(&pool, &new_design("Scarf"))
        .await
        .unwrap();

    let found = DesignRepo::search(&pool, " ").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].prompt, "Beautiful dress");
}

#[sqlx::test(migrations = "./migrations")]
async fn search_on_empty_store_returns_nothing(pool: SqlitePool) {
    let found = DesignRepo::search(&pool, "xyz").await.unwrap();
    assert!(found.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn search_is_case_insensitive_substring(pool: SqlitePool) {
    let dress = DesignRepo::create(&pool, &new_design("Beautiful dress"))
        .await
        .unwrap();
    DesignRepo::create(&pool, &new_design("Leather jacket"))
        .await
        .unwrap();

    let found = DesignRepo::search(&pool, "DRESS").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, dress.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn search_treats_wildcards_literally(pool: SqlitePool) {
    DesignRepo::create(&pool, &new_design("Summer dress")).await.unwrap();
    let sale = DesignRepo::create(&pool, &new_design("50% off gown"))
        .await
        .unwrap();

    let found = DesignRepo::search(&pool, "%").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, sale.id);

    assert!(DesignRepo::search(&pool, "_").await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn update_changes_only_given_fields(pool: SqlitePool) {
    let created = DesignRepo::create(&pool, &new_design("Plain shirt"))
        .await
        .unwrap();

    let patch = DesignPatch {
        prompt: Some("Striped shirt".to_string()),
        height: Some(768),
        ..Default::default()
    };
    let updated = DesignRepo::update(&pool, created.id, &patch)
        .await
        .unwrap()
        .expect("design should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.prompt, "Striped shirt");
    assert_eq!(updated.height, 768);
    assert_eq!(updated.width, created.width);
    assert_eq!(updated.negative_prompt, created.negative_prompt);
    assert_eq!(updated.file_path, created.file_path);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_missing_design_returns_none(pool: SqlitePool) {
    let patch = DesignPatch {
        prompt: Some("Ghost".to_string()),
        ..Default::default()
    };
    let updated = DesignRepo::update(&pool, Uuid::new_v4(), &patch)
        .await
        .unwrap();
    assert!(updated.is_none());
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn delete_twice_reports_absence(pool: SqlitePool) {
    let created = DesignRepo::create(&pool, &new_design("Scarf")).await.unwrap();

    assert!(DesignRepo::delete(&pool, created.id).await.unwrap());
    assert!(!DesignRepo::delete(&pool, created.id).await.unwrap());
    assert!(DesignRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn health_check_succeeds_on_live_pool(pool: SqlitePool) {
    fashionsd_db::health_check(&pool).await.unwrap();
}
