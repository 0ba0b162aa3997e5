//! Route registry, lookup and reverse lookup.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Resolve (method, path) to the first matching route
//! - Distinguish "no such path" from "wrong method"
//! - Build concrete paths from route names
//!
//! # Design Decisions
//! - Immutable after `seal()` (thread-safe without locks)
//! - O(1) name lookup via HashMap
//! - O(n) route scan (acceptable for typical route counts)
//! - First match wins, in registration order

use std::collections::{BTreeSet, HashMap};

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::matcher::{MatchOptions, TrailingSlash};
use crate::routing::method::Method;
use crate::routing::params::Params;
use crate::routing::pattern::Pattern;

/// Identifier returned by [`Router::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(usize);

impl RouteId {
    /// Position of the route in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A registered binding of method and pattern to a handler.
#[derive(Debug, Clone)]
pub struct Route<H> {
    id: RouteId,
    method: Method,
    pattern: Pattern,
    name: Option<String>,
    handler: H,
}

impl<H> Route<H> {
    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Successful resolution of a request.
#[derive(Debug)]
pub struct MatchResult<'r, H> {
    pub route: &'r Route<H>,
    pub params: Params,
}

impl<'r, H> MatchResult<'r, H> {
    pub fn handler(&self) -> &'r H {
        &self.route.handler
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Building,
    Sealed,
}

/// Ordered route registry.
///
/// Routes are registered while the router is building, then [`Router::seal`]
/// freezes it. A sealed router is shared by reference (typically through an
/// `Arc`) and only read from.
#[derive(Debug)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
    names: HashMap<String, RouteId>,
    options: MatchOptions,
    state: State,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Create an empty router with exact, case-sensitive matching.
    pub fn new() -> Self {
        Self::with_options(MatchOptions::default())
    }

    pub fn with_options(options: MatchOptions) -> Self {
        Self {
            routes: Vec::new(),
            names: HashMap::new(),
            options,
            state: State::Building,
        }
    }

    /// Register a route.
    ///
    /// Registration order is match priority. On error the registry is left
    /// untouched. Under [`TrailingSlash::Ignore`] one trailing `/` is
    /// trimmed from the pattern, so `/dashboard/` registers as `/dashboard`.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        name: Option<&str>,
        handler: H,
    ) -> RouteResult<RouteId> {
        if self.state == State::Sealed {
            return Err(RouteError::RouterSealed);
        }

        let pattern = match self.options.trailing_slash {
            TrailingSlash::Ignore if pattern.len() > 1 => {
                Pattern::parse(pattern.strip_suffix('/').unwrap_or(pattern))?
            }
            _ => Pattern::parse(pattern)?,
        };
        if let Some(name) = name {
            if self.names.contains_key(name) {
                return Err(RouteError::DuplicateRouteName(name.to_string()));
            }
        }

        let id = RouteId(self.routes.len());
        if let Some(name) = name {
            self.names.insert(name.to_string(), id);
        }

        tracing::debug!(
            method = %method,
            pattern = %pattern,
            name = name.unwrap_or("-"),
            "Route registered"
        );

        self.routes.push(Route {
            id,
            method,
            pattern,
            name: name.map(str::to_string),
            handler,
        });
        Ok(id)
    }

    /// Forbid further registration. Idempotent.
    pub fn seal(&mut self) {
        if self.state == State::Building {
            self.state = State::Sealed;
            tracing::info!(routes = self.routes.len(), "Router sealed");
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.state == State::Sealed
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Resolve a request to its route and captured parameters.
    pub fn resolve(&self, method: Method, path: &str) -> RouteResult<MatchResult<'_, H>> {
        let not_found = || RouteError::NotFound {
            method,
            path: path.to_string(),
        };
        let segments = self.options.split_path(path).ok_or_else(not_found)?;

        let matched = self
            .routes
            .iter()
            .filter(|route| route.method == method)
            .find_map(|route| {
                route
                    .pattern
                    .captures(&segments, &self.options)
                    .map(|params| MatchResult { route, params })
            });
        if let Some(matched) = matched {
            return Ok(matched);
        }

        let allowed = self.methods_matching(&segments);
        if allowed.is_empty() {
            Err(not_found())
        } else {
            Err(RouteError::MethodNotAllowed {
                method,
                path: path.to_string(),
                allowed,
            })
        }
    }

    /// Methods of every route whose pattern matches `path`, sorted and
    /// deduplicated.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        self.options
            .split_path(path)
            .map(|segments| self.methods_matching(&segments))
            .unwrap_or_default()
    }

    fn methods_matching(&self, segments: &[&str]) -> Vec<Method> {
        self.routes
            .iter()
            .filter(|route| route.pattern.is_match(segments, &self.options))
            .map(|route| route.method)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Build the concrete path of a named route.
    ///
    /// Values are substituted verbatim; escaping is the caller's concern.
    pub fn reverse_lookup<K, V>(&self, name: &str, params: &[(K, V)]) -> RouteResult<String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let route = self
            .route_by_name(name)
            .ok_or_else(|| RouteError::UnknownRouteName(name.to_string()))?;

        route
            .pattern
            .render(params)
            .map_err(|param| RouteError::MissingParameter {
                route: name.to_string(),
                param,
            })
    }

    /// Reverse lookup for routes without parameters.
    pub fn url_for(&self, name: &str) -> RouteResult<String> {
        self.reverse_lookup::<&str, &str>(name, &[])
    }

    pub fn route(&self, id: RouteId) -> Option<&Route<H>> {
        self.routes.get(id.0)
    }

    pub fn route_by_name(&self, name: &str) -> Option<&Route<H>> {
        self.names.get(name).and_then(|id| self.route(*id))
    }

    /// All routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router<&'static str> {
        let mut router = Router::new();
        router.register(Method::Get, "/", Some("home"), "h1").unwrap();
        router
            .register(Method::Get, "/dashboard", Some("dashboard"), "h2")
            .unwrap();
        router
    }

    #[test]
    fn test_resolve_literal_routes() {
        let router = router();

        let m = router.resolve(Method::Get, "/").unwrap();
        assert_eq!(*m.handler(), "h1");
        assert!(m.params.is_empty());

        let m = router.resolve(Method::Get, "/dashboard").unwrap();
        assert_eq!(*m.handler(), "h2");
        assert_eq!(m.route.name(), Some("dashboard"));
    }

    #[test]
    fn test_first_registered_wins() {
        let mut router = Router::new();
        router.register(Method::Get, "/users/me", None, "me").unwrap();
        router.register(Method::Get, "/users/:id", None, "by-id").unwrap();

        assert_eq!(*router.resolve(Method::Get, "/users/me").unwrap().handler(), "me");
        let m = router.resolve(Method::Get, "/users/7").unwrap();
        assert_eq!(*m.handler(), "by-id");
        assert_eq!(m.params.get("id"), Some("7"));
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let mut router = router();
        router
            .register(Method::Delete, "/dashboard", None, "h3")
            .unwrap();

        match router.resolve(Method::Post, "/dashboard") {
            Err(RouteError::MethodNotAllowed { allowed, .. }) => {
                assert_eq!(allowed, vec![Method::Get, Method::Delete]);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(router.allowed_methods("/dashboard"), vec![Method::Get, Method::Delete]);
        assert!(router.allowed_methods("/nope").is_empty());
    }

    #[test]
    fn test_relative_path_is_not_found() {
        let router = router();
        assert!(matches!(
            router.resolve(Method::Get, "dashboard"),
            Err(RouteError::NotFound { .. })
        ));
    }

    #[test]
    fn test_seal_is_idempotent() {
        let mut router = router();
        router.seal();
        router.seal();
        assert!(router.is_sealed());
        assert_eq!(
            router.register(Method::Get, "/late", None, "x"),
            Err(RouteError::RouterSealed)
        );
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_sealed_check_precedes_pattern_check() {
        let mut router: Router<()> = Router::new();
        router.seal();
        assert_eq!(
            router.register(Method::Get, "bad", None, ()),
            Err(RouteError::RouterSealed)
        );
    }

    #[test]
    fn test_ignore_trailing_slash() {
        let mut router = Router::with_options(MatchOptions {
            trailing_slash: TrailingSlash::Ignore,
            ..MatchOptions::default()
        });
        router.register(Method::Get, "/dashboard", None, "h").unwrap();

        assert!(router.resolve(Method::Get, "/dashboard/").is_ok());
        assert!(router.resolve(Method::Get, "/dashboard").is_ok());
        assert_eq!(router.options().trailing_slash, TrailingSlash::Ignore);
        assert!(router.options().case_sensitive);
    }

    #[test]
    fn test_ignore_trims_pattern_trailing_slash() {
        let mut router = Router::with_options(MatchOptions {
            trailing_slash: TrailingSlash::Ignore,
            ..MatchOptions::default()
        });
        router
            .register(Method::Get, "/users/:id/", Some("user"), "h")
            .unwrap();
        router.register(Method::Get, "/", Some("home"), "root").unwrap();

        assert_eq!(router.route_by_name("user").unwrap().pattern().as_str(), "/users/:id");
        assert_eq!(router.url_for("home"), Ok("/".to_string()));
        assert_eq!(
            router.resolve(Method::Get, "/users/9/").unwrap().params.get("id"),
            Some("9")
        );
        // Only one slash is trimmed
        assert!(matches!(
            router.register(Method::Get, "/a//", None, "x"),
            Err(RouteError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_strict_rejects_pattern_trailing_slash() {
        let mut router = Router::new();
        assert_eq!(router.options(), &MatchOptions::default());
        assert!(matches!(
            router.register(Method::Get, "/dashboard/", None, "h"),
            Err(RouteError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_route_introspection() {
        let router = router();
        let id = router.route_by_name("dashboard").unwrap().id();
        assert_eq!(id.index(), 1);
        assert_eq!(router.route(id).unwrap().pattern().as_str(), "/dashboard");
        assert_eq!(
            router.routes().map(|r| r.method()).collect::<Vec<_>>(),
            vec![Method::Get, Method::Get]
        );
        assert_eq!(router.url_for("home"), Ok("/".to_string()));
    }
}
