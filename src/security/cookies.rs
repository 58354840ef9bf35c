// ABOUTME: Helpers for the auth_token session cookie
// ABOUTME: Parses Cookie request headers and builds Set-Cookie values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use axum::http::HeaderMap;

/// Name of the session cookie carrying the `JWT`
pub const AUTH_COOKIE: &str = "auth_token";

/// Extract a named cookie value from the request headers
///
/// Handles multiple `Cookie` headers and multiple `name=value` pairs per
/// header.
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_owned())
        })
}

/// Build the `Set-Cookie` value that establishes a session
///
/// `HttpOnly` keeps the token away from page scripts; `SameSite=Lax`
/// still lets top-level navigations carry the session.
#[must_use]
pub fn build_auth_cookie(token: &str, max_age_seconds: i64) -> String {
    format!("{AUTH_COOKIE}={token}; Path=/; Max-Age={max_age_seconds}; HttpOnly; SameSite=Lax")
}

/// Build the `Set-Cookie` value that clears the session
#[must_use]
pub fn clear_auth_cookie() -> String {
    format!("{AUTH_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
