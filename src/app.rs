//! The application's route table.
//!
//! ```text
//! GET /           → home       (name "home")
//! GET /dashboard  → dashboard  (name "dashboard")
//! ```
//!
//! Both handlers return placeholder content; page rendering lives elsewhere.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use serde_json::json;

use crate::http::{DispatchRouter, RequestContext};
use crate::routing::{MatchOptions, Method, RouteResult, Router};

/// Register the application routes and seal the router.
pub fn build_router(options: MatchOptions) -> RouteResult<DispatchRouter> {
    let mut router: DispatchRouter = Router::with_options(options);
    router.register(Method::Get, "/", Some("home"), home)?;
    router.register(Method::Get, "/dashboard", Some("dashboard"), dashboard)?;
    router.seal();
    Ok(router)
}

/// Landing page.
pub fn home(ctx: &RequestContext<'_>) -> Response {
    match ctx.router.url_for("dashboard") {
        Ok(href) => Html(format!(
            "<!doctype html><title>Home</title><a href=\"{href}\">Dashboard</a>"
        ))
        .into_response(),
        Err(e) => {
            tracing::error!(request_id = %ctx.request_id, error = %e, "Link generation failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Dashboard summary.
pub fn dashboard(ctx: &RequestContext<'_>) -> Response {
    Json(json!({
        "page": ctx.route_name.unwrap_or("dashboard"),
        "request_id": ctx.request_id,
    }))
    .into_response()
}
