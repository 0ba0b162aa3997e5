//! HTTP route-dispatch core with a small axum host.
//!
//! The [`routing`] module is self-contained: register `(method, pattern)`
//! bindings with optional unique names, seal the registry, then resolve
//! requests and build paths from route names. The remaining modules host a
//! sealed router behind an HTTP listener.
//!
//! ```
//! use route_dispatch::routing::{Method, Router};
//!
//! let mut router = Router::new();
//! router.register(Method::Get, "/users/:id", Some("user"), "show_user").unwrap();
//! router.seal();
//!
//! let matched = router.resolve(Method::Get, "/users/42").unwrap();
//! assert_eq!(*matched.handler(), "show_user");
//! assert_eq!(matched.params.get("id"), Some("42"));
//! assert_eq!(router.reverse_lookup("user", &[("id", "42")]).unwrap(), "/users/42");
//! ```

// Core subsystem
pub mod routing;

// Hosting
pub mod app;
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Method, RouteError, Router};
