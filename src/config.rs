// ABOUTME: Environment-driven server configuration
// ABOUTME: Parses ports, database URL, JWT secret, and token expiry from env vars
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Environment-based configuration.

use anyhow::{Context, Result};
use std::env;
use tracing::warn;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default session lifetime
const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;
/// Development-only fallback secret, never used when `ENVIRONMENT=production`
const DEV_JWT_SECRET: &str = "larder-dev-secret-do-not-use-in-production";

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port (`HTTP_PORT`)
    pub http_port: u16,
    /// Database connection URL (`DATABASE_URL`)
    pub database_url: String,
    /// Shared secret for session token signing (`JWT_SECRET`)
    pub jwt_secret: String,
    /// Session token lifetime in hours (`TOKEN_EXPIRY_HOURS`)
    pub token_expiry_hours: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable, or if
    /// `JWT_SECRET` is missing while `ENVIRONMENT=production`.
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid HTTP_PORT value: {port}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/larder.db".into());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                let environment =
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
                anyhow::ensure!(
                    environment != "production",
                    "JWT_SECRET must be set in production"
                );
                warn!("JWT_SECRET not set, using development fallback secret");
                DEV_JWT_SECRET.into()
            }
        };

        let token_expiry_hours = match env::var("TOKEN_EXPIRY_HOURS") {
            Ok(hours) => hours
                .parse::<i64>()
                .with_context(|| format!("Invalid TOKEN_EXPIRY_HOURS value: {hours}"))?,
            Err(_) => DEFAULT_TOKEN_EXPIRY_HOURS,
        };

        Ok(Self {
            http_port,
            database_url,
            jwt_secret,
            token_expiry_hours,
        })
    }
}
