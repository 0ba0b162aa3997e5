//! Per-request context handed to route handlers.
//!
//! # Design Decisions
//! - Handlers are plain function pointers, bound once at registration
//! - The context borrows from the request and the sealed router; nothing
//!   is cloned per request beyond the captured params

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tower_http::request_id::RequestId;

use crate::routing::{Method, Params, Router};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Signature of every handler the HTTP server can dispatch to.
pub type Handler = fn(&RequestContext<'_>) -> Response;

/// What a handler knows about the request it serves.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: Method,
    pub path: &'a str,
    pub params: &'a Params,
    /// Name of the matched route, if it was registered with one.
    pub route_name: Option<&'a str>,
    pub request_id: &'a str,
    /// The sealed router, for building links with `url_for`.
    pub router: &'a Router<Handler>,
}

/// Request ID assigned by the request-id layer, or `"unknown"`.
pub fn request_id(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.header_value())
        .or_else(|| request.headers().get(X_REQUEST_ID))
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_from_extension() {
        let mut req = Request::builder().uri("/").body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(RequestId::new(HeaderValue::from_static("abc-123")));
        assert_eq!(request_id(&req), "abc-123");
    }

    #[test]
    fn test_request_id_from_header_or_unknown() {
        let req = Request::builder()
            .header(X_REQUEST_ID, "from-header")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_id(&req), "from-header");

        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(request_id(&req), "unknown");
    }
}
