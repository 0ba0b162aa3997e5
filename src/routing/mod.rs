//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     register(method, "/users/:id", name, handler)
//!     → pattern.rs (parse into literal/param segments)
//!     → router.rs (append, index name)
//!     → seal() freezes the registry
//!
//! Incoming Request (method, path)
//!     → matcher.rs (split path, apply match options)
//!     → router.rs (first route of the method whose segments match)
//!     → Return: MatchResult, NotFound or MethodNotAllowed
//!
//! Reverse Lookup (name, params)
//!     → router.rs (name index)
//!     → pattern.rs (substitute params)
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable once sealed
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)
//! - Handlers are opaque to the router; it stores them but never calls them

pub mod error;
pub mod matcher;
pub mod method;
pub mod params;
pub mod pattern;
pub mod router;

pub use error::{RouteError, RouteResult};
pub use matcher::{MatchOptions, TrailingSlash};
pub use method::{Method, UnsupportedMethod};
pub use params::Params;
pub use pattern::{Pattern, Segment};
pub use router::{MatchResult, Route, RouteId, Router};
