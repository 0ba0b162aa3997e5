//! Routing error definitions.

use thiserror::Error;

use crate::routing::method::Method;

/// Errors produced by route registration, resolution and reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Pattern rejected at registration.
    #[error("Invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: &'static str },

    /// A route with this name is already registered.
    #[error("Duplicate route name: {0}")]
    DuplicateRouteName(String),

    /// Registration attempted after the router was sealed.
    #[error("Router is sealed; no further routes can be registered")]
    RouterSealed,

    /// No route of any method matches the path.
    #[error("No route matches {method} {path}")]
    NotFound { method: Method, path: String },

    /// The path matches routes of other methods only.
    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        allowed: Vec<Method>,
    },

    /// Reverse lookup of a name that was never registered.
    #[error("Unknown route name: {0}")]
    UnknownRouteName(String),

    /// Reverse lookup without a value for one of the pattern's parameters.
    #[error("Route {route} requires parameter {param}")]
    MissingParameter { route: String, param: String },
}

impl RouteError {
    /// True for the kinds a transport turns into a 404/405 response.
    pub fn is_routing_miss(&self) -> bool {
        matches!(
            self,
            RouteError::NotFound { .. } | RouteError::MethodNotAllowed { .. }
        )
    }
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_miss_classification() {
        let not_found = RouteError::NotFound {
            method: Method::Get,
            path: "/missing".into(),
        };
        let not_allowed = RouteError::MethodNotAllowed {
            method: Method::Post,
            path: "/".into(),
            allowed: vec![Method::Get],
        };
        assert!(not_found.is_routing_miss());
        assert!(not_allowed.is_routing_miss());

        assert!(!RouteError::RouterSealed.is_routing_miss());
        assert!(!RouteError::UnknownRouteName("home".into()).is_routing_miss());
        assert!(!RouteError::DuplicateRouteName("home".into()).is_routing_miss());
    }
}
