// ABOUTME: Route handlers for a user's favorite recipes
// ABOUTME: Session-scoped add, list, and remove of favorite links
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use crate::database::users::UsersManager;
use crate::errors::AppError;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Request body for flagging a favorite recipe
#[derive(Debug, Deserialize)]
pub struct AddFavoriteBody {
    /// Id of an existing recipe
    pub recipe_id: i64,
}

/// Favorite recipe route handlers
pub struct FavoriteRoutes;

impl FavoriteRoutes {
    /// Create all favorites routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/v1/users/favorites", post(Self::handle_add))
            .route("/api/v1/users/favorites", get(Self::handle_list))
            .route(
                "/api/v1/users/favorites/:recipe_id",
                delete(Self::handle_remove),
            )
            .with_state(resources)
    }

    /// Handle POST /api/v1/users/favorites - Flag a favorite recipe
    ///
    /// Re-adding an already-favorited recipe is a no-op.
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<AddFavoriteBody>,
    ) -> Result<Response, AppError> {
        let identity = authenticate(&headers, &resources)?;

        let manager = UsersManager::new(resources.database.pool().clone());
        manager.add_favorite(identity.user_id, body.recipe_id).await?;

        Ok((StatusCode::CREATED, ()).into_response())
    }

    /// Handle GET /api/v1/users/favorites - List the caller's favorites
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let identity = authenticate(&headers, &resources)?;

        let manager = UsersManager::new(resources.database.pool().clone());
        let recipes = manager.list_favorites(identity.user_id).await?;

        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle DELETE /api/v1/users/favorites/:recipe_id - Unflag a favorite
    ///
    /// Deleting a link that never existed still returns 204.
    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<i64>,
    ) -> Result<Response, AppError> {
        let identity = authenticate(&headers, &resources)?;

        let manager = UsersManager::new(resources.database.pool().clone());
        manager.remove_favorite(identity.user_id, recipe_id).await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
