// ABOUTME: Route module organization for the larder HTTP API
// ABOUTME: Per-domain route definitions plus the shared session authentication helper
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! HTTP routes, organized by domain. Each module contains route
//! definitions and thin handlers that delegate to the database managers.

/// Favorite recipe routes
pub mod favorites;
/// Health check route
pub mod health;
/// Ingredient routes
pub mod ingredients;
/// Recipe routes
pub mod recipes;
/// User registration and login routes
pub mod users;

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::security::cookies::{get_cookie_value, AUTH_COOKIE};
use crate::server::ServerResources;
use axum::http::HeaderMap;
use std::sync::Arc;

/// Resolve the caller's identity from the session cookie or bearer header
///
/// The `auth_token` cookie is the primary carrier (set by login); a
/// `Bearer` Authorization header is accepted as a fallback for
/// non-browser clients.
pub(crate) fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthenticatedUser, AppError> {
    let token = if let Some(token) = get_cookie_value(headers, AUTH_COOKIE) {
        token
    } else if let Some(bearer) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        bearer.trim().to_owned()
    } else {
        return Err(AppError::auth_required());
    };

    resources.auth.validate_token(&token)
}
