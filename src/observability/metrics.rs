//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): dispatch attempts by outcome
//! - `router_dispatch_duration_seconds` (histogram): time spent resolving
//!   and running the handler
//!
//! Outcomes are `matched`, `not_found`, `method_not_allowed` and `failed`.
//! The `method` label is one of the supported methods or `other`; request
//! methods outside that set share the `other` series.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Method;

/// Result of dispatching one request through the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Matched,
    NotFound,
    MethodNotAllowed,
    /// A non-miss routing error reached the transport.
    Failed,
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Matched => "matched",
            DispatchOutcome::NotFound => "not_found",
            DispatchOutcome::MethodNotAllowed => "method_not_allowed",
            DispatchOutcome::Failed => "failed",
        }
    }
}

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Label value for a request method; `None` for unsupported methods.
pub fn method_label(method: Option<Method>) -> &'static str {
    method.map(|m| m.as_str()).unwrap_or("other")
}

/// Record one dispatch.
pub fn record_dispatch(method: Option<Method>, outcome: DispatchOutcome, start: Instant) {
    let method = method_label(method);
    metrics::counter!(
        "router_dispatch_total",
        "method" => method,
        "outcome" => outcome.as_str()
    )
    .increment(1);
    metrics::histogram!(
        "router_dispatch_duration_seconds",
        "method" => method,
        "outcome" => outcome.as_str()
    )
    .record(start.elapsed().as_secs_f64());
}
