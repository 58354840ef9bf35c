// ABOUTME: Security helpers shared across route modules
// ABOUTME: Currently session cookie parsing and construction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

/// Session cookie helpers
pub mod cookies;
