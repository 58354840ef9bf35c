// ABOUTME: Route handlers for the recipes REST API
// ABOUTME: Recipe creation with ingredient association and ingredient-filtered listing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use crate::database::recipes::{CreateRecipeRequest, RecipesManager};
use crate::errors::{AppError, ErrorCode};
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An ingredient reference inside a recipe creation payload
#[derive(Debug, Deserialize)]
pub struct IngredientRef {
    /// Ingredient name; created on the fly if it does not exist yet
    pub name: String,
}

/// Request body for creating a recipe
#[derive(Debug, Deserialize)]
pub struct CreateRecipeBody {
    /// Recipe name, must be non-empty
    pub name: String,
    /// Ingredients, must be non-empty
    #[serde(default)]
    pub ingredients: Vec<IngredientRef>,
}

impl From<CreateRecipeBody> for CreateRecipeRequest {
    fn from(body: CreateRecipeBody) -> Self {
        Self {
            name: body.name,
            ingredients: body.ingredients.into_iter().map(|i| i.name).collect(),
        }
    }
}

/// Response for a created recipe
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Identifier of the new recipe
    pub id: i64,
}

/// Query parameters for listing recipes
///
/// `ingredient` may repeat (`?ingredient=a&ingredient=b`) and a single
/// value may itself be a comma-separated list (`?ingredient=a,b`).
#[derive(Debug, Deserialize, Default)]
pub struct ListRecipesQuery {
    /// Required ingredient names (AND semantics)
    #[serde(default)]
    pub ingredient: Vec<String>,
}

/// Flatten repeated parameters and comma-separated values into one list
fn flatten_ingredient_params(params: Vec<String>) -> Vec<String> {
    params
        .into_iter()
        .flat_map(|value| {
            value
                .split(',')
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Recipe route handlers
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/v1/recipes", post(Self::handle_create))
            .route("/api/v1/recipes", get(Self::handle_list))
            .with_state(resources)
    }

    /// Handle POST /api/v1/recipes - Create a recipe with its ingredients
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateRecipeBody>,
    ) -> Result<Response, AppError> {
        let manager = RecipesManager::new(resources.database.pool().clone());
        let request: CreateRecipeRequest = body.into();
        let id = manager.create(&request).await?;

        tracing::info!(recipe = %request.name.trim(), id, "recipe created");

        Ok((StatusCode::CREATED, Json(CreatedResponse { id })).into_response())
    }

    /// Handle GET /api/v1/recipes - List recipes, optionally filtered
    ///
    /// With `ingredient` parameters, returns exactly the recipes whose
    /// ingredient set contains ALL the named ingredients. An unknown
    /// ingredient name is a client error on this endpoint.
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let manager = RecipesManager::new(resources.database.pool().clone());

        let names = flatten_ingredient_params(query.ingredient);
        let recipes = if names.is_empty() {
            manager.list_all().await?
        } else {
            manager.find_by_ingredients(&names).await.map_err(|e| {
                if e.code == ErrorCode::ResourceNotFound {
                    AppError::invalid_input(e.message)
                } else {
                    e
                }
            })?
        };

        Ok((StatusCode::OK, Json(recipes)).into_response())
    }
}
