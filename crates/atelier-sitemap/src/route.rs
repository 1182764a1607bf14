//! Route extraction from declarative route markup.

use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// The `path="/x"`, `path='/x'` or `path={"/x"}` attribute of a `<Route`
/// element. The tag may span lines; the value may not.
static ROUTE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<Route\b[^>]*?\bpath\s*=\s*\{?\s*(?:"([^"\n]*)"|'([^'\n]*)')"#)
        .expect("route pattern is valid")
});

/// A canonical, parameter-free site path such as `/colors`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoutePath(String);

impl RoutePath {
    /// Accepts `raw` (trimmed) if it is a non-empty absolute path without
    /// parameter (`:`) or wildcard (`*`) markers.
    pub fn parse(raw: &str) -> Option<Self> {
        let path = raw.trim();
        if path.is_empty() || path == "*" || !path.starts_with('/') {
            return None;
        }
        if path.contains(':') || path.contains('*') {
            return None;
        }
        Some(Self(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extracts the accepted route paths of `source`, deduplicated and sorted.
pub fn extract_routes(source: &str) -> Vec<RoutePath> {
    let mut found = BTreeSet::new();
    for captures in ROUTE_PATH.captures_iter(source) {
        let Some(raw) = captures.get(1).or_else(|| captures.get(2)) else {
            continue;
        };
        match RoutePath::parse(raw.as_str()) {
            Some(path) => {
                found.insert(path);
            }
            None => tracing::trace!(path = raw.as_str(), "route skipped"),
        }
    }
    found.into_iter().collect()
}
