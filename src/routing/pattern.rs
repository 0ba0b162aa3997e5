//! Route pattern parsing, matching and rendering.
//!
//! A pattern is a `/`-delimited sequence of segments. A segment starting
//! with `:` is a named parameter (`/users/:id`); anything else is a literal.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::routing::error::RouteError;
use crate::routing::matcher::MatchOptions;
use crate::routing::params::Params;

/// One component of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches only an identical path segment.
    Literal(String),
    /// Matches any non-empty path segment and captures it under this name.
    Param(String),
}

/// A parsed, immutable route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern string.
    ///
    /// Rejects empty patterns, patterns not starting with `/`, empty
    /// segments (except the bare root `/`), unnamed parameters and
    /// parameter names repeated within one pattern.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason| RouteError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| invalid("pattern must start with '/'"))?;

        if rest.is_empty() {
            return Ok(Self {
                raw: raw.to_string(),
                segments: Vec::new(),
            });
        }

        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        for part in rest.split('/') {
            if part.is_empty() {
                return Err(invalid("pattern contains an empty segment"));
            }
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("parameter segment has no name")),
                Some(name) => {
                    if !seen.insert(name) {
                        return Err(invalid("parameter name is declared twice"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match already-split path segments, returning the captured parameters.
    pub fn captures(&self, path: &[&str], options: &MatchOptions) -> Option<Params> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(literal) => {
                    if !options.literal_matches(literal, value) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.push(name.as_str(), *value);
                }
            }
        }
        Some(params)
    }

    /// Match without capturing; used for the method-agnostic scan.
    pub fn is_match(&self, path: &[&str], options: &MatchOptions) -> bool {
        path.len() == self.segments.len()
            && self.segments.iter().zip(path).all(|(segment, value)| match segment {
                Segment::Literal(literal) => options.literal_matches(literal, value),
                Segment::Param(_) => !value.is_empty(),
            })
    }

    /// Substitute parameter values into the pattern.
    ///
    /// Values are inserted verbatim. On failure returns the name of the
    /// first parameter without a value.
    pub fn render<K, V>(&self, params: &[(K, V)]) -> Result<String, String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => {
                    let value = params
                        .iter()
                        .find(|(k, _)| k.as_ref() == name)
                        .map(|(_, v)| v.as_ref())
                        .ok_or_else(|| name.clone())?;
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }
}

impl FromStr for Pattern {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
