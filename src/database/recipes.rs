// ABOUTME: Recipe database operations
// ABOUTME: Transactional recipe+ingredient creation and the multi-ingredient AND filter
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Recipe storage.
//!
//! The filter query joins the `recipe_ingredients` junction table once
//! per required ingredient. A single join could only express "contains
//! A OR B"; requiring all of N ingredients needs N independent join
//! pairs, each under a fresh per-index alias (`j1`/`i1` .. `jN`/`iN`),
//! with one conjunctive equality condition per pair. Only the loop
//! index is ever spliced into the SQL text; ingredient ids go through
//! bind parameters.

use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, Recipe};
use chrono::{DateTime, Utc};
use sqlx::{Row, Sqlite, SqlitePool};

/// Request to create a recipe together with its ingredient associations
#[derive(Debug, Clone)]
pub struct CreateRecipeRequest {
    /// Recipe name, must be non-empty
    pub name: String,
    /// Ingredient names, must be non-empty; missing ingredients are created
    pub ingredients: Vec<String>,
}

/// Recipe database operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a recipe and associate it with its ingredients
    ///
    /// Runs as a single transaction: the recipe insert, every ingredient
    /// upsert, and every junction insert either all persist or all roll
    /// back. Ingredient names that already exist are reused; duplicate
    /// junction pairs are no-ops. Returns the new recipe's id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name or empty ingredient
    /// list (checked before any write), or a database error if any
    /// statement fails.
    pub async fn create(&self, request: &CreateRecipeRequest) -> AppResult<i64> {
        let name = request.name.trim();
        if name.is_empty() || request.ingredients.iter().all(|n| n.trim().is_empty()) {
            return Err(AppError::invalid_input(
                "can't create a recipe without a name or without ingredients",
            ));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let recipe_id = sqlx::query("INSERT INTO recipes (name, created_at) VALUES ($1, $2)")
            .bind(name)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?
            .last_insert_rowid();

        for ingredient_name in normalize_names(request.ingredients.iter().map(String::as_str)) {
            let ingredient_id = upsert_ingredient(&mut tx, &ingredient_name).await?;

            sqlx::query(
                r"
                INSERT OR IGNORE INTO recipe_ingredients (recipe_id, ingredient_id)
                VALUES ($1, $2)
                ",
            )
            .bind(recipe_id)
            .bind(ingredient_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to associate ingredient: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit recipe: {e}")))?;

        Ok(recipe_id)
    }

    /// Get a live recipe by id, with its ingredients eagerly loaded
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails.
    pub async fn get(&self, recipe_id: i64) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(
            "SELECT id, name, created_at FROM recipes WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let recipe = self.row_to_recipe(&row).await?;
        Ok(Some(recipe))
    }

    /// List all live recipes, with ingredients eagerly loaded
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails.
    pub async fn list_all(&self) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            "SELECT id, name, created_at FROM recipes WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            recipes.push(self.row_to_recipe(row).await?);
        }
        Ok(recipes)
    }

    /// Find recipes containing ALL of the named ingredients
    ///
    /// Every name must resolve to a live ingredient; an unresolved name
    /// fails the whole operation with `ResourceNotFound`, distinct from
    /// a storage failure. An empty name list is a caller bug — use
    /// [`Self::list_all`] for the unfiltered path.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown ingredient name, or a
    /// database error if a query fails.
    pub async fn find_by_ingredients(&self, names: &[String]) -> AppResult<Vec<Recipe>> {
        let names = normalize_names(names.iter().map(String::as_str));
        if names.is_empty() {
            return self.list_all().await;
        }

        // Resolve every requested name up front; no partial matches.
        let mut ingredient_ids = Vec::with_capacity(names.len());
        for name in &names {
            let id: Option<i64> = sqlx::query_scalar(
                "SELECT id FROM ingredients WHERE name = $1 AND deleted_at IS NULL",
            )
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to resolve ingredient: {e}")))?;

            let id = id.ok_or_else(|| AppError::not_found(format!("Ingredient '{name}'")))?;
            ingredient_ids.push(id);
        }

        // One join pair per required ingredient, each under a fresh
        // per-index alias, plus one ANDed equality condition per pair.
        let mut joins = String::new();
        let mut conditions = vec!["r.deleted_at IS NULL".to_owned()];
        for index in 1..=ingredient_ids.len() {
            joins.push_str(&format!(
                " INNER JOIN recipe_ingredients j{index} ON j{index}.recipe_id = r.id \
                  INNER JOIN ingredients i{index} ON i{index}.id = j{index}.ingredient_id"
            ));
            conditions.push(format!("i{index}.id = ${index}"));
        }

        let query = format!(
            "SELECT DISTINCT r.id, r.name, r.created_at FROM recipes r{joins} WHERE {} ORDER BY r.id",
            conditions.join(" AND ")
        );

        let mut statement = sqlx::query(&query);
        for id in &ingredient_ids {
            statement = statement.bind(id);
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to filter recipes: {e}")))?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            recipes.push(self.row_to_recipe(row).await?);
        }
        Ok(recipes)
    }

    /// Materialize a recipe row, eagerly loading its ingredient list
    async fn row_to_recipe(&self, row: &sqlx::sqlite::SqliteRow) -> AppResult<Recipe> {
        let id: i64 = row.get("id");
        let name: String = row.get("name");
        let created_at: DateTime<Utc> = row.get("created_at");

        let ingredients = load_recipe_ingredients(&self.pool, id).await?;

        Ok(Recipe {
            id,
            name,
            ingredients,
            created_at,
        })
    }
}

/// Load the full ingredient list for a recipe from the junction table
pub(crate) async fn load_recipe_ingredients(
    pool: &SqlitePool,
    recipe_id: i64,
) -> AppResult<Vec<Ingredient>> {
    let rows = sqlx::query(
        r"
        SELECT i.id, i.name
        FROM ingredients i
        INNER JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
        WHERE ri.recipe_id = $1 AND i.deleted_at IS NULL
        ORDER BY i.id
        ",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database(format!("Failed to load recipe ingredients: {e}")))?;

    Ok(rows
        .iter()
        .map(|r| Ingredient {
            id: r.get("id"),
            name: r.get("name"),
        })
        .collect())
}

/// Insert-or-reuse an ingredient by name inside a transaction
///
/// A preexisting row (including a soft-deleted one, which is revived)
/// is reused instead of erroring.
async fn upsert_ingredient(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    name: &str,
) -> AppResult<i64> {
    sqlx::query(
        r"
        INSERT INTO ingredients (name, created_at)
        VALUES ($1, $2)
        ON CONFLICT(name) DO UPDATE SET deleted_at = NULL
        ",
    )
    .bind(name)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to upsert ingredient: {e}")))?;

    sqlx::query_scalar("SELECT id FROM ingredients WHERE name = $1")
        .bind(name)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to resolve ingredient id: {e}")))
}

/// Trim, drop empties, and de-duplicate while preserving first-seen order
///
/// Order only affects generated alias numbering, not result correctness,
/// but a stable order keeps the emitted SQL deterministic.
fn normalize_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = Vec::new();
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !seen.iter().any(|s| s == name) {
            seen.push(name.to_owned());
        }
    }
    seen
}
