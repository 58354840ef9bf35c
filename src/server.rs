// ABOUTME: Server resource wiring and router assembly
// ABOUTME: Injects database and auth handles into route modules and serves the app
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Server assembly.
//!
//! All shared handles live in [`ServerResources`] and are passed
//! explicitly to each route module at startup; there are no ambient
//! globals.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::routes::{
    favorites::FavoriteRoutes, health::HealthRoutes, ingredients::IngredientRoutes,
    recipes::RecipeRoutes, users::UserRoutes,
};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared handles injected into every route module
pub struct ServerResources {
    /// Database pool wrapper
    pub database: Database,
    /// Session token manager
    pub auth: AuthManager,
    /// Server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Bundle the server's shared handles
    #[must_use]
    pub fn new(database: Database, auth: AuthManager, config: ServerConfig) -> Self {
        Self {
            database,
            auth,
            config,
        }
    }
}

/// Build the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(IngredientRoutes::routes(resources.clone()))
        .merge(RecipeRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
        .merge(FavoriteRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the HTTP listener and serve until shutdown
///
/// # Errors
///
/// Returns an error if binding the port or serving fails.
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let port = resources.config.http_port;
    let app = router(resources);

    let listener = TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .with_context(|| format!("Failed to bind HTTP port {port}"))?;

    info!("larder server listening on port {port}");

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")
}
