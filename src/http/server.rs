//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum app with a single dispatching fallback
//! - Wire up middleware (request ID, tracing, timeout)
//! - Translate requests into `Router::resolve` calls
//! - Invoke the matched handler or answer 404 / 405
//! - Record dispatch metrics

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{request_id, Handler, RequestContext, X_REQUEST_ID};
use crate::http::response;
use crate::lifecycle::shutdown::{ctrl_c, Shutdown};
use crate::observability::metrics::{self, DispatchOutcome};
use crate::routing::{Method, RouteError, Router};

/// Router type hosted by the HTTP server.
pub type DispatchRouter = Router<Handler>;

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<DispatchRouter>,
}

/// HTTP server hosting a sealed route table.
pub struct HttpServer {
    app: axum::Router,
    config: AppConfig,
    router: Arc<DispatchRouter>,
}

impl HttpServer {
    /// Create a server. The router is sealed if it was not already.
    pub fn new(config: AppConfig, mut router: DispatchRouter) -> Self {
        router.seal();
        let router = Arc::new(router);
        let state = AppState {
            router: router.clone(),
        };

        let app = Self::build_app(&config, state);
        Self {
            app,
            config,
            router,
        }
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &AppConfig, state: AppState) -> axum::Router {
        axum::Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    let request_id = req
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        path = %req.uri().path(),
                        request_id = %request_id,
                    )
                }),
            )
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The Axum app, for driving the server without a listener.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    /// The sealed route table.
    pub fn router(&self) -> &Arc<DispatchRouter> {
        &self.router
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.serve(listener, ctrl_c()).await
    }

    /// Run the server until `shutdown` is triggered.
    pub async fn run_until(
        self,
        listener: TcpListener,
        shutdown: &Shutdown,
    ) -> Result<(), std::io::Error> {
        let mut rx = shutdown.subscribe();
        self.serve(listener, async move {
            let _ = rx.recv().await;
        })
        .await
    }

    async fn serve<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.router.len(),
            case_sensitive = self.router.options().case_sensitive,
            trailing_slash = ?self.router.options().trailing_slash,
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fallback handler: every request is dispatched through the route table.
///
/// HEAD is not folded into GET: it is outside the supported methods, so a
/// GET-only path answers HEAD with 405 and `Allow: GET`.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(&request);
    let path = request.uri().path();
    let http_method = request.method();

    let Ok(method) = Method::try_from(http_method) else {
        let allowed = state.router.allowed_methods(path);
        tracing::warn!(
            request_id = %request_id,
            method = %http_method,
            path = %path,
            "Unsupported method"
        );
        if allowed.is_empty() {
            metrics::record_dispatch(None, DispatchOutcome::NotFound, start);
            return response::not_found();
        }
        metrics::record_dispatch(None, DispatchOutcome::MethodNotAllowed, start);
        return response::method_not_allowed(&allowed);
    };

    match state.router.resolve(method, path) {
        Ok(matched) => {
            tracing::debug!(
                request_id = %request_id,
                route = matched.route.name().unwrap_or("-"),
                pattern = %matched.route.pattern(),
                "Route matched"
            );
            let ctx = RequestContext {
                method,
                path,
                params: &matched.params,
                route_name: matched.route.name(),
                request_id: &request_id,
                router: &state.router,
            };
            let handler = matched.handler();
            let response = handler(&ctx);
            metrics::record_dispatch(Some(method), DispatchOutcome::Matched, start);
            response
        }
        Err(err) => {
            let outcome = if !err.is_routing_miss() {
                DispatchOutcome::Failed
            } else if matches!(err, RouteError::MethodNotAllowed { .. }) {
                DispatchOutcome::MethodNotAllowed
            } else {
                DispatchOutcome::NotFound
            };
            tracing::warn!(request_id = %request_id, error = %err, "No route matched");
            metrics::record_dispatch(Some(method), outcome, start);
            err.into_response()
        }
    }
}
