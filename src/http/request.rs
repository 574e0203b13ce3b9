//! Request identity handling.
//!
//! # Responsibilities
//! - Extract the caller-supplied request ID, or mint a UUID v4
//! - Name the headers the gateway contract uses
//!
//! # Design Decisions
//! - The request ID is established before anything else so every log
//!   line and the downstream wire header carry the same value.

use axum::http::HeaderMap;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";
pub const X_API_KEY: &str = "x-api-key";
pub const X_USER_TOKEN: &str = "x-user-token";
pub const X_USER_REF: &str = "x-user-ref";

/// Caller-supplied request ID, or a fresh UUID v4 when absent/blank.
pub fn extract_request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Optional string header, empty when absent.
pub fn header_or_empty(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
