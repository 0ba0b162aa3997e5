//! Routing error to HTTP response mapping.
//!
//! # Design Decisions
//! - NotFound → 404, MethodNotAllowed → 405 with an `Allow` header
//! - Registration-class errors never reach the transport; if they do they
//!   are a programming error and become 500

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::{Method, RouteError};

/// `Allow` header value for a set of methods, e.g. `GET, DELETE`.
pub fn allow_header(allowed: &[Method]) -> Option<HeaderValue> {
    let value = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    HeaderValue::from_str(&value).ok()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

pub fn method_not_allowed(allowed: &[Method]) -> Response {
    let mut response = (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    if let Some(value) = allow_header(allowed) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            RouteError::NotFound { .. } => not_found(),
            RouteError::MethodNotAllowed { allowed, .. } => method_not_allowed(&allowed),
            other => {
                tracing::error!(error = %other, "Routing error reached the transport");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
