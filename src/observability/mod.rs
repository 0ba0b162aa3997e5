//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and HTTP subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (dispatch counters and latency histogram)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metrics are cheap (no-ops until a recorder is installed)

pub mod logging;
pub mod metrics;
