//! `KeyId` header authentication module.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::ErrorBody;

/// Header carrying the static API key. Clients send `KeyId:`; header names
/// are case-insensitive, so the normalized lowercase form is used here.
pub const KEY_ID_HEADER: &str = "keyid";

/// Auth layer function that takes the expected key as a parameter.
///
/// If no key is configured the layer is a no-op (local dev mode, matching
/// the mock's default behavior).
pub async fn key_id_auth_layer(
    expected_key: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = expected_key else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(KEY_ID_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(provided_key) if constant_time_compare(provided_key, &expected) => {
            next.run(request).await
        }
        Some(_) => unauthorized_response("Invalid KeyId"),
        None => unauthorized_response("Missing KeyId header"),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorBody {
        error: message.to_string(),
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-key-id", "test-key-id"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-key-id", "test-key-1d"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_constant_time_compare_empty() {
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("", "not-empty"));
    }
}
