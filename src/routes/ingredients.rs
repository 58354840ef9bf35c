// ABOUTME: Route handlers for the ingredients REST API
// ABOUTME: Ingredient creation (expert role) and listing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use crate::database::ingredients::IngredientsManager;
use crate::errors::AppError;
use crate::models::UserRole;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for creating an ingredient
#[derive(Debug, Deserialize)]
pub struct CreateIngredientBody {
    /// Ingredient name, must be non-empty
    pub name: String,
}

/// Response for a created entity
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Identifier of the newly created entity
    pub id: i64,
}

/// Ingredient route handlers
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/v1/ingredients", post(Self::handle_create))
            .route("/api/v1/ingredients", get(Self::handle_list))
            .with_state(resources)
    }

    /// Handle POST /api/v1/ingredients - Create an ingredient
    ///
    /// Only experts may define new ingredients.
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateIngredientBody>,
    ) -> Result<Response, AppError> {
        let identity = authenticate(&headers, &resources)?;
        match identity.role {
            UserRole::Expert => {}
            UserRole::Basic | UserRole::Admin => {
                return Err(AppError::permission_denied(
                    "only experts may create ingredients",
                ));
            }
        }

        let manager = IngredientsManager::new(resources.database.pool().clone());
        let id = manager.create(&body.name).await?;

        tracing::info!(user = %identity.username, ingredient = %body.name.trim(), "ingredient created");

        Ok((StatusCode::CREATED, Json(CreatedResponse { id })).into_response())
    }

    /// Handle GET /api/v1/ingredients - List all ingredients
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let manager = IngredientsManager::new(resources.database.pool().clone());
        let ingredients = manager.list().await?;

        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }
}
