// ABOUTME: User management database operations
// ABOUTME: Handles user creation, credential lookup, and the favorites junction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use crate::database::recipes::load_recipe_ingredients;
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, User, UserRole};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

/// User database operations manager
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new users manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user with an already-hashed password, returning the id
    ///
    /// # Errors
    ///
    /// Returns a validation error if the username is already taken, or a
    /// database error if the insert fails.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
    ) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO users (username, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                AppError::invalid_input(format!("username '{username}' is already taken"))
            } else {
                AppError::database(format!("Failed to create user: {e}"))
            }
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Get a live user by username
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.get_user_impl("username", username).await
    }

    /// Get a live user by id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        self.get_user_impl("id", &user_id.to_string()).await
    }

    /// Get a live user by id, erroring with not-found when absent
    ///
    /// The favorites paths re-resolve the token's user id against the
    /// table so a deleted user is an explicit 404, not a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user is absent or soft-deleted,
    /// or a database error if the query fails.
    pub async fn get_by_id_required(&self, user_id: i64) -> AppResult<User> {
        self.get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))
    }

    async fn get_user_impl(&self, field: &str, value: &str) -> AppResult<Option<User>> {
        let query = format!(
            r"
            SELECT id, username, password_hash, role, created_at
            FROM users WHERE {field} = $1 AND deleted_at IS NULL
            "
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Mark a recipe as one of the user's favorites
    ///
    /// Idempotent: a preexisting favorite link is a no-op. Both the user
    /// and the recipe must exist.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user or recipe, or a
    /// database error if a query fails.
    pub async fn add_favorite(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        let user = self.get_by_id_required(user_id).await?;

        let recipe_exists: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM recipes WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to resolve recipe: {e}")))?;

        if recipe_exists.is_none() {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        sqlx::query(
            "INSERT OR IGNORE INTO favorite_recipes (user_id, recipe_id) VALUES ($1, $2)",
        )
        .bind(user.id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add favorite: {e}")))?;

        Ok(())
    }

    /// List the user's favorite recipes with ingredients eagerly loaded
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, or a database
    /// error if a query fails.
    pub async fn list_favorites(&self, user_id: i64) -> AppResult<Vec<Recipe>> {
        let user = self.get_by_id_required(user_id).await?;

        let rows = sqlx::query(
            r"
            SELECT r.id, r.name, r.created_at
            FROM recipes r
            INNER JOIN favorite_recipes fr ON fr.recipe_id = r.id
            WHERE fr.user_id = $1 AND r.deleted_at IS NULL
            ORDER BY r.id
            ",
        )
        .bind(user.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list favorites: {e}")))?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row.get("id");
            let name: String = row.get("name");
            let created_at: DateTime<Utc> = row.get("created_at");
            let ingredients = load_recipe_ingredients(&self.pool, id).await?;
            recipes.push(Recipe {
                id,
                name,
                ingredients,
                created_at,
            });
        }
        Ok(recipes)
    }

    /// Remove a recipe from the user's favorites
    ///
    /// Idempotent: removing a link that does not exist succeeds without
    /// surfacing a deletion count.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, or a database
    /// error if the delete fails.
    pub async fn remove_favorite(&self, user_id: i64, recipe_id: i64) -> AppResult<()> {
        let user = self.get_by_id_required(user_id).await?;

        sqlx::query("DELETE FROM favorite_recipes WHERE user_id = $1 AND recipe_id = $2")
            .bind(user.id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove favorite: {e}")))?;

        Ok(())
    }
}

/// Convert a database row to a [`User`]
fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> AppResult<User> {
    let role: String = row.get("role");
    let role = role
        .parse::<UserRole>()
        .map_err(|e| AppError::database(format!("Corrupt role column: {e}")))?;

    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        role,
        created_at: row.get("created_at"),
    })
}
