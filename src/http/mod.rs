//! HTTP hosting of the route-dispatch core.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout layers)
//!     → server.rs dispatch (Method conversion, Router::resolve)
//!     → request.rs (RequestContext handed to the matched handler)
//!     → response.rs (routing misses become 404 / 405)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{Handler, RequestContext, X_REQUEST_ID};
pub use server::{DispatchRouter, HttpServer};
