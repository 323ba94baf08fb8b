//! Cross-origin policy shared by every function.

use axum::http::header::{self, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (header::CONTENT_TYPE, "application/json"),
];

/// `OPTIONS`: 204, CORS headers, empty body.
pub async fn preflight() -> Response {
    (StatusCode::NO_CONTENT, CORS_HEADERS).into_response()
}

/// JSON body with the CORS headers attached.
pub fn json_response(status: StatusCode, body: &serde_json::Value) -> Response {
    (status, CORS_HEADERS, body.to_string()).into_response()
}
