//! Path splitting and segment comparison.
//!
//! # Responsibilities
//! - Split a request path into `/`-delimited segments
//! - Compare literal segments (case-sensitive unless configured otherwise)
//! - Apply the configured trailing-slash policy
//!
//! # Design Decisions
//! - Exact, case-sensitive matching with no normalization by default
//! - No regex to guarantee O(n) matching
//! - A path that does not start with `/` has no segments and matches nothing

use serde::{Deserialize, Serialize};

/// How a trailing `/` on a request path is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// `/dashboard/` and `/dashboard` are different paths.
    #[default]
    Strict,
    /// One trailing `/` is dropped before matching.
    Ignore,
}

/// Matching behaviour shared by every route in a router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Compare literal segments case-sensitively.
    pub case_sensitive: bool,

    /// Trailing slash policy.
    pub trailing_slash: TrailingSlash,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            trailing_slash: TrailingSlash::Strict,
        }
    }
}

impl MatchOptions {
    /// Split `path` into segments, or `None` if it is not an absolute path.
    ///
    /// `/` yields no segments; under [`TrailingSlash::Strict`] a trailing
    /// slash yields a final empty segment.
    pub fn split_path<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        let rest = path.strip_prefix('/')?;
        let rest = match self.trailing_slash {
            TrailingSlash::Ignore => rest.strip_suffix('/').unwrap_or(rest),
            TrailingSlash::Strict => rest,
        };

        if rest.is_empty() {
            return Some(Vec::new());
        }
        Some(rest.split('/').collect())
    }

    /// Compare a literal pattern segment against a path segment.
    pub fn literal_matches(&self, literal: &str, segment: &str) -> bool {
        if self.case_sensitive {
            literal == segment
        } else {
            literal.eq_ignore_ascii_case(segment)
        }
    }
}
