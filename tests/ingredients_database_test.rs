// ABOUTME: Unit tests for the ingredients database manager
// ABOUTME: Covers idempotent creation, name lookup, listing, and soft-delete visibility
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![allow(missing_docs, clippy::unwrap_used)]

use larder::database::{ingredients::IngredientsManager, Database};
use larder::errors::ErrorCode;

async fn create_test_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

#[tokio::test]
async fn test_create_and_get_by_name() {
    let db = create_test_db().await;
    let manager = IngredientsManager::new(db.pool().clone());

    let id = manager.create("cheddar").await.unwrap();
    let ingredient = manager.get_by_name("cheddar").await.unwrap().unwrap();

    assert_eq!(ingredient.id, id);
    assert_eq!(ingredient.name, "cheddar");
}

#[tokio::test]
async fn test_create_is_idempotent_on_name_collision() {
    let db = create_test_db().await;
    let manager = IngredientsManager::new(db.pool().clone());

    let first = manager.create("cheddar").await.unwrap();
    let second = manager.create("cheddar").await.unwrap();

    // Same row reused, no duplicate created
    assert_eq!(first, second);
    assert_eq!(manager.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_trims_and_rejects_empty_name() {
    let db = create_test_db().await;
    let manager = IngredientsManager::new(db.pool().clone());

    let err = manager.create("   ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let id = manager.create("  leek  ").await.unwrap();
    let ingredient = manager.get_by_name("leek").await.unwrap().unwrap();
    assert_eq!(ingredient.id, id);
}

#[tokio::test]
async fn test_get_by_name_misses_unknown() {
    let db = create_test_db().await;
    let manager = IngredientsManager::new(db.pool().clone());

    assert!(manager.get_by_name("stilton").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_returns_all_live_ingredients() {
    let db = create_test_db().await;
    let manager = IngredientsManager::new(db.pool().clone());

    manager.create("cheddar").await.unwrap();
    manager.create("bread").await.unwrap();
    manager.create("potato").await.unwrap();

    let names: Vec<String> = manager
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["cheddar", "bread", "potato"]);
}

#[tokio::test]
async fn test_soft_deleted_ingredient_is_invisible() {
    let db = create_test_db().await;
    let manager = IngredientsManager::new(db.pool().clone());

    manager.create("cheddar").await.unwrap();
    sqlx::query("UPDATE ingredients SET deleted_at = CURRENT_TIMESTAMP WHERE name = 'cheddar'")
        .execute(db.pool())
        .await
        .unwrap();

    assert!(manager.get_by_name("cheddar").await.unwrap().is_none());
    assert!(manager.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_revives_soft_deleted_row() {
    let db = create_test_db().await;
    let manager = IngredientsManager::new(db.pool().clone());

    let id = manager.create("cheddar").await.unwrap();
    sqlx::query("UPDATE ingredients SET deleted_at = CURRENT_TIMESTAMP WHERE name = 'cheddar'")
        .execute(db.pool())
        .await
        .unwrap();

    let revived = manager.create("cheddar").await.unwrap();
    assert_eq!(revived, id);
    assert!(manager.get_by_name("cheddar").await.unwrap().is_some());
}
