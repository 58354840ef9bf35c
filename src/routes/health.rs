// ABOUTME: Health check route
// ABOUTME: Liveness endpoint for load balancers and monitoring
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

/// Health check route handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health route
    #[must_use]
    pub fn routes() -> Router {
        Router::new().route("/api/v1/health", get(Self::handle_health))
    }

    async fn handle_health() -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
            })),
        )
    }
}
