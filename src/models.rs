// ABOUTME: Domain models for ingredients, recipes, users, and roles
// ABOUTME: Serde-serializable types shared between the database managers and route handlers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Core domain types.
//!
//! Entities are soft-deleted: rows carry a `deleted_at` marker and every
//! read path filters on it, so the structs here only ever represent live
//! records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single ingredient that can appear in recipes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: i64,
    /// Unique, non-empty ingredient name
    pub name: String,
}

/// A recipe with its full ingredient list eagerly resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: i64,
    /// Non-empty recipe name
    pub name: String,
    /// Ingredients referenced by this recipe (order-irrelevant set)
    pub ingredients: Vec<Ingredient>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// User role controlling access to privileged endpoints
///
/// Closed enumeration; authorization checkpoints match on it
/// exhaustively rather than comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular user: browse recipes, manage own favorites
    Basic,
    /// Privileged user: may create ingredients
    Expert,
    /// Administrator: may create users
    Admin,
}

impl UserRole {
    /// Database/wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Expert => "expert",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "expert" => Ok(Self::Expert),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Unique, non-empty username
    pub username: String,
    /// Bcrypt password hash; never serialized back to callers
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Access role
    pub role: UserRole,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
