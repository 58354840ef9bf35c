// ABOUTME: Tests for database connection setup and migration
// ABOUTME: Covers file creation, reopen persistence, and migration idempotence
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![allow(missing_docs, clippy::unwrap_used)]

use larder::database::{ingredients::IngredientsManager, Database};
use tempfile::tempdir;

#[tokio::test]
async fn test_file_database_is_created_and_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("larder.db");
    let url = format!("sqlite:{}", path.display());

    // mode=rwc creates the file on first connect
    let db = Database::new(&url).await.unwrap();
    assert!(path.exists());

    IngredientsManager::new(db.pool().clone())
        .create("cheddar")
        .await
        .unwrap();
    db.pool().close().await;

    // Data survives a reopen
    let reopened = Database::new(&url).await.unwrap();
    let ingredients = IngredientsManager::new(reopened.pool().clone())
        .list()
        .await
        .unwrap();
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0].name, "cheddar");
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let db = Database::new("sqlite::memory:").await.unwrap();

    // A second run must not clobber existing data
    IngredientsManager::new(db.pool().clone())
        .create("cheddar")
        .await
        .unwrap();
    db.migrate().await.unwrap();

    let ingredients = IngredientsManager::new(db.pool().clone())
        .list()
        .await
        .unwrap();
    assert_eq!(ingredients.len(), 1);
}
