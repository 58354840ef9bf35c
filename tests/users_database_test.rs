// ABOUTME: Unit tests for the users database manager
// ABOUTME: Covers user creation, lookup, and favorites add/list/remove semantics
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![allow(missing_docs, clippy::unwrap_used)]

use larder::database::{
    recipes::{CreateRecipeRequest, RecipesManager},
    users::UsersManager,
    Database,
};
use larder::errors::ErrorCode;
use larder::models::UserRole;

async fn create_test_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

async fn create_recipe(db: &Database, name: &str, ingredients: &[&str]) -> i64 {
    RecipesManager::new(db.pool().clone())
        .create(&CreateRecipeRequest {
            name: name.to_owned(),
            ingredients: ingredients.iter().map(|s| (*s).to_owned()).collect(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_and_get_user() {
    let db = create_test_db().await;
    let manager = UsersManager::new(db.pool().clone());

    let id = manager.create("gwen", "hash", UserRole::Expert).await.unwrap();

    let by_name = manager.get_by_username("gwen").await.unwrap().unwrap();
    assert_eq!(by_name.id, id);
    assert_eq!(by_name.role, UserRole::Expert);

    let by_id = manager.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "gwen");
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let db = create_test_db().await;
    let manager = UsersManager::new(db.pool().clone());

    manager.create("gwen", "hash", UserRole::Basic).await.unwrap();
    let err = manager
        .create("gwen", "other-hash", UserRole::Basic)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.message.contains("gwen"));
}

#[tokio::test]
async fn test_add_and_list_favorites_with_eager_ingredients() {
    let db = create_test_db().await;
    let manager = UsersManager::new(db.pool().clone());

    let user_id = manager.create("gwen", "hash", UserRole::Basic).await.unwrap();
    let welsh = create_recipe(&db, "welsh", &["cheddar", "bread"]).await;
    let raclette = create_recipe(&db, "raclette", &["cheddar", "potato"]).await;

    manager.add_favorite(user_id, welsh).await.unwrap();
    manager.add_favorite(user_id, raclette).await.unwrap();

    let favorites = manager.list_favorites(user_id).await.unwrap();
    assert_eq!(favorites.len(), 2);
    assert!(favorites.iter().all(|r| r.ingredients.len() == 2));
}

#[tokio::test]
async fn test_re_adding_favorite_is_idempotent() {
    let db = create_test_db().await;
    let manager = UsersManager::new(db.pool().clone());

    let user_id = manager.create("gwen", "hash", UserRole::Basic).await.unwrap();
    let welsh = create_recipe(&db, "welsh", &["cheddar", "bread"]).await;

    manager.add_favorite(user_id, welsh).await.unwrap();
    manager.add_favorite(user_id, welsh).await.unwrap();

    let favorites = manager.list_favorites(user_id).await.unwrap();
    assert_eq!(favorites.len(), 1);

    let link_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorite_recipes")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(link_count, 1);
}

#[tokio::test]
async fn test_remove_favorite_is_idempotent() {
    let db = create_test_db().await;
    let manager = UsersManager::new(db.pool().clone());

    let user_id = manager.create("gwen", "hash", UserRole::Basic).await.unwrap();
    let welsh = create_recipe(&db, "welsh", &["cheddar", "bread"]).await;

    manager.add_favorite(user_id, welsh).await.unwrap();
    manager.remove_favorite(user_id, welsh).await.unwrap();
    assert!(manager.list_favorites(user_id).await.unwrap().is_empty());

    // Deleting a link that no longer exists still succeeds
    manager.remove_favorite(user_id, welsh).await.unwrap();

    // As does deleting one that never existed
    let other = create_recipe(&db, "raclette", &["cheddar", "potato"]).await;
    manager.remove_favorite(user_id, other).await.unwrap();
}

#[tokio::test]
async fn test_favorites_for_unknown_user_are_not_found() {
    let db = create_test_db().await;
    let manager = UsersManager::new(db.pool().clone());
    let welsh = create_recipe(&db, "welsh", &["cheddar", "bread"]).await;

    let add = manager.add_favorite(999, welsh).await.unwrap_err();
    assert_eq!(add.code, ErrorCode::ResourceNotFound);

    let list = manager.list_favorites(999).await.unwrap_err();
    assert_eq!(list.code, ErrorCode::ResourceNotFound);

    let remove = manager.remove_favorite(999, welsh).await.unwrap_err();
    assert_eq!(remove.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_favoriting_unknown_recipe_is_not_found() {
    let db = create_test_db().await;
    let manager = UsersManager::new(db.pool().clone());

    let user_id = manager.create("gwen", "hash", UserRole::Basic).await.unwrap();
    let err = manager.add_favorite(user_id, 404).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_soft_deleted_user_treated_as_absent() {
    let db = create_test_db().await;
    let manager = UsersManager::new(db.pool().clone());

    let user_id = manager.create("gwen", "hash", UserRole::Basic).await.unwrap();
    sqlx::query("UPDATE users SET deleted_at = CURRENT_TIMESTAMP WHERE id = $1")
        .bind(user_id)
        .execute(db.pool())
        .await
        .unwrap();

    assert!(manager.get_by_username("gwen").await.unwrap().is_none());

    let err = manager.list_favorites(user_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
