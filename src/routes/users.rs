// ABOUTME: Route handlers for user registration and login
// ABOUTME: Admin-gated user creation and cookie-based session establishment
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use crate::auth::{hash_password, verify_password};
use crate::database::users::UsersManager;
use crate::errors::AppError;
use crate::models::UserRole;
use crate::routes::authenticate;
use crate::security::cookies::{build_auth_cookie, clear_auth_cookie};
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for creating a user
#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    /// Unique username, must be non-empty
    pub username: String,
    /// Plaintext password, must be non-empty; stored as a bcrypt hash
    pub password: String,
    /// Role for the new user (defaults to `basic`)
    #[serde(default = "default_role")]
    pub role: UserRole,
}

const fn default_role() -> UserRole {
    UserRole::Basic
}

/// Request body for logging in
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    /// Username
    pub username: String,
    /// Plaintext password
    pub password: String,
}

/// Response for a created user
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Identifier of the new user
    pub id: i64,
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Authenticated user id
    pub user_id: i64,
    /// Authenticated username
    pub username: String,
    /// Authenticated role
    pub role: UserRole,
}

/// User route handlers
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/v1/users", post(Self::handle_create))
            .route("/api/v1/users/login", post(Self::handle_login))
            .route("/api/v1/users/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle POST /api/v1/users - Create a user (admin only)
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateUserBody>,
    ) -> Result<Response, AppError> {
        let identity = authenticate(&headers, &resources)?;
        match identity.role {
            UserRole::Admin => {}
            UserRole::Basic | UserRole::Expert => {
                return Err(AppError::permission_denied("only admins may create users"));
            }
        }

        if body.username.trim().is_empty() || body.password.is_empty() {
            return Err(AppError::invalid_input(
                "can't create user with empty username/password",
            ));
        }

        let password_hash = hash_password(&body.password)?;

        let manager = UsersManager::new(resources.database.pool().clone());
        let id = manager
            .create(body.username.trim(), &password_hash, body.role)
            .await?;

        tracing::info!(admin = %identity.username, username = %body.username.trim(), "user created");

        Ok((StatusCode::CREATED, Json(CreatedResponse { id })).into_response())
    }

    /// Handle POST /api/v1/users/login - Verify credentials, set session cookie
    ///
    /// Unknown username and wrong password produce the same response so
    /// the endpoint cannot be used to enumerate usernames.
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginBody>,
    ) -> Result<Response, AppError> {
        let manager = UsersManager::new(resources.database.pool().clone());

        let user = manager
            .get_by_username(body.username.trim())
            .await?
            .ok_or_else(invalid_credentials)?;

        let is_valid = verify_password(&body.password, &user.password_hash).await?;
        if !is_valid {
            tracing::warn!(username = %user.username, "login failed: wrong password");
            return Err(invalid_credentials());
        }

        let token = resources.auth.generate_token(&user)?;
        let cookie = build_auth_cookie(&token, resources.auth.expiry_seconds());

        tracing::info!(username = %user.username, user_id = user.id, "user logged in");

        let response = LoginResponse {
            user_id: user.id,
            username: user.username,
            role: user.role,
        };

        Ok((StatusCode::OK, [(SET_COOKIE, cookie)], Json(response)).into_response())
    }

    /// Handle POST /api/v1/users/logout - Expire the session cookie
    ///
    /// Always succeeds; a request without a session is a no-op.
    async fn handle_logout() -> Response {
        (StatusCode::NO_CONTENT, [(SET_COOKIE, clear_auth_cookie())], ()).into_response()
    }
}

fn invalid_credentials() -> AppError {
    AppError::invalid_input("wrong data for username/password")
}
