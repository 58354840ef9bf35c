// ABOUTME: Main server binary for the larder REST API
// ABOUTME: Initializes logging, config, database, optional admin bootstrap, then serves
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use anyhow::Result;
use clap::Parser;
use larder::{
    auth::{hash_password, AuthManager},
    config::ServerConfig,
    database::{users::UsersManager, Database},
    logging::LoggingConfig,
    models::UserRole,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "larder-server", about = "REST backend for ingredients, recipes, and favorites", version)]
struct Args {
    /// HTTP port to listen on (overrides HTTP_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env().init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    info!("connecting to database at {}", config.database_url);
    let database = Database::new(&config.database_url).await?;

    bootstrap_admin(&database).await?;

    let auth = AuthManager::new(config.jwt_secret.as_bytes(), config.token_expiry_hours);
    let resources = Arc::new(ServerResources::new(database, auth, config));

    server::run(resources).await
}

/// Create the initial admin account from `ADMIN_USERNAME`/`ADMIN_PASSWORD`
///
/// Without at least one admin the user-creation endpoint is unreachable.
/// Skipped when the variables are unset or the username already exists.
async fn bootstrap_admin(database: &Database) -> Result<()> {
    let (Ok(username), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set, skipping admin bootstrap");
        return Ok(());
    };

    let manager = UsersManager::new(database.pool().clone());
    if manager.get_by_username(&username).await?.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(&password)?;
    let id = manager
        .create(&username, &password_hash, UserRole::Admin)
        .await?;
    info!("bootstrapped admin user '{username}' ({id})");

    Ok(())
}
