// ABOUTME: Ingredient database operations
// ABOUTME: Name-keyed CRUD with idempotent creation via insert-or-ignore
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use crate::errors::{AppError, AppResult};
use crate::models::Ingredient;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

/// Ingredient database operations manager
pub struct IngredientsManager {
    pool: SqlitePool,
}

impl IngredientsManager {
    /// Create a new ingredients manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an ingredient, returning its id
    ///
    /// Idempotent on name collisions: if an ingredient with this name
    /// already exists it is reused (and revived if it was soft-deleted)
    /// rather than duplicated. Two racing creates for the same name both
    /// converge on the surviving row.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name, or a database error
    /// if a query fails.
    pub async fn create(&self, name: &str) -> AppResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input(
                "can't create ingredient with empty name",
            ));
        }

        sqlx::query(
            r"
            INSERT INTO ingredients (name, created_at)
            VALUES ($1, $2)
            ON CONFLICT(name) DO UPDATE SET deleted_at = NULL
            ",
        )
        .bind(name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create ingredient: {e}")))?;

        let id: i64 = sqlx::query_scalar("SELECT id FROM ingredients WHERE name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to resolve ingredient id: {e}")))?;

        Ok(id)
    }

    /// Look up a live ingredient by exact name
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query(
            "SELECT id, name FROM ingredients WHERE name = $1 AND deleted_at IS NULL",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;

        Ok(row.map(|r| Ingredient {
            id: r.get("id"),
            name: r.get("name"),
        }))
    }

    /// List all live ingredients
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list(&self) -> AppResult<Vec<Ingredient>> {
        let rows = sqlx::query(
            "SELECT id, name FROM ingredients WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        Ok(rows
            .iter()
            .map(|r| Ingredient {
                id: r.get("id"),
                name: r.get("name"),
            })
            .collect())
    }
}
