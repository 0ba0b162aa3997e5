//! Shared helpers for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use route_dispatch::http::{DispatchRouter, HttpServer, RequestContext};
use route_dispatch::routing::{Method, Router};
use route_dispatch::AppConfig;
use tower::ServiceExt;

/// Handler that echoes the matched route name and captured params.
pub fn echo(ctx: &RequestContext<'_>) -> axum::response::Response {
    let params = ctx
        .params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", ctx.route_name.unwrap_or("-"), params).into_response()
}

/// Route table used across HTTP tests.
pub fn sample_router() -> DispatchRouter {
    let mut router: DispatchRouter = Router::new();
    router.register(Method::Get, "/", Some("home"), echo).unwrap();
    router
        .register(Method::Get, "/dashboard", Some("dashboard"), echo)
        .unwrap();
    router
        .register(Method::Get, "/users/:id", Some("user"), echo)
        .unwrap();
    router
        .register(Method::Delete, "/users/:id", Some("user_delete"), echo)
        .unwrap();
    router
}

pub fn server(router: DispatchRouter) -> HttpServer {
    HttpServer::new(AppConfig::default(), router)
}

/// Send one request through the app without a listener.
pub async fn send(server: &HttpServer, method: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    server.app().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
