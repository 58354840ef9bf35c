// ABOUTME: Library root for the larder server
// ABOUTME: REST backend for ingredients, recipes, users, and favorites over SQLite
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # larder
//!
//! A small REST backend managing users, ingredients, and recipes, with
//! cookie/JWT session auth and a many-to-many favorites relationship.
//!
//! Recipes can be filtered by an arbitrary-length list of required
//! ingredients with AND semantics; see [`database::recipes`] for the
//! self-join query construction this requires.

/// JWT session management and password hashing
pub mod auth;
/// Environment-driven configuration
pub mod config;
/// Connection pool, migrations, and per-domain managers
pub mod database;
/// Unified error types and HTTP response mapping
pub mod errors;
/// Structured logging setup
pub mod logging;
/// Domain models
pub mod models;
/// HTTP route handlers
pub mod routes;
/// Security helpers (session cookies)
pub mod security;
/// Router assembly and serve loop
pub mod server;
