// ============================================================================
// Menu Infrastructure - Route Table
// File: crates/menu-infrastructure/src/routing/route_table.rs
// Description: Configured named routes, reversible and resolvable
// ============================================================================

use regex::Regex;
use thiserror::Error;
use tracing::warn;

use menu_core::ports::UrlResolver;
use menu_shared::config::RouteSettings;
use menu_shared::constants::PATH_SEPARATOR;

#[derive(Error, Debug)]
pub enum RouteTableError {
    #[error("Route {name} has an invalid path pattern: {path}")]
    InvalidPattern { name: String, path: String },

    #[error("Route {name} pattern failed to compile: {source}")]
    Compile {
        name: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug)]
struct Route {
    name: String,
    path: String,
    /// Routes with `{param}` segments cannot be reversed without arguments.
    has_params: bool,
    matcher: Regex,
}

/// Named routes in declaration order.
///
/// Paths are literal except for `{param}` segments, which match any single
/// non-empty segment. The first declared route wins in both directions.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &[RouteSettings]) -> Result<Self, RouteTableError> {
        let mut table = Self::new();
        for route in settings {
            table.add(&route.name, &route.path)?;
        }
        Ok(table)
    }

    pub fn add(&mut self, name: &str, path: &str) -> Result<(), RouteTableError> {
        if !path.starts_with(PATH_SEPARATOR) {
            return Err(RouteTableError::InvalidPattern {
                name: name.to_string(),
                path: path.to_string(),
            });
        }
        if self.routes.iter().any(|r| r.name == name) {
            warn!("Duplicate route name {} ignored for reversal: {}", name, path);
        }

        let (pattern, has_params) = compile_pattern(name, path)?;
        let matcher = Regex::new(&pattern).map_err(|source| RouteTableError::Compile {
            name: name.to_string(),
            source,
        })?;

        self.routes.push(Route {
            name: name.to_string(),
            path: path.to_string(),
            has_params,
            matcher,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Anchored regex for a route path. A single trailing separator is optional
/// so `/page1` and `/page1/` resolve to the same route.
fn compile_pattern(name: &str, path: &str) -> Result<(String, bool), RouteTableError> {
    let trimmed = path.strip_suffix(PATH_SEPARATOR).unwrap_or(path);
    let mut pattern = String::from("^");
    let mut has_params = false;

    for segment in trimmed.split(PATH_SEPARATOR).skip(1) {
        pattern.push(PATH_SEPARATOR);
        if let Some(param) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            if param.is_empty() || param.contains(['{', '}']) {
                return Err(RouteTableError::InvalidPattern {
                    name: name.to_string(),
                    path: path.to_string(),
                });
            }
            pattern.push_str("[^/]+");
            has_params = true;
        } else if segment.contains(['{', '}']) {
            return Err(RouteTableError::InvalidPattern {
                name: name.to_string(),
                path: path.to_string(),
            });
        } else {
            pattern.push_str(&regex::escape(segment));
        }
    }

    pattern.push_str("/?$");
    Ok((pattern, has_params))
}

impl UrlResolver for RouteTable {
    fn reverse(&self, route_name: &str) -> Option<String> {
        let route = self.routes.iter().find(|r| r.name == route_name)?;
        if route.has_params {
            return None;
        }
        Some(route.path.clone())
    }

    fn resolve_route_name(&self, path: &str) -> Option<String> {
        self.routes
            .iter()
            .find(|r| r.matcher.is_match(path))
            .map(|r| r.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::from_settings(&[
            RouteSettings { name: "home".into(), path: "/".into() },
            RouteSettings { name: "page1".into(), path: "/page1/".into() },
            RouteSettings { name: "subsection1".into(), path: "/section1/subsection1/".into() },
            RouteSettings { name: "article".into(), path: "/articles/{slug}/".into() },
        ])
        .unwrap()
    }

    #[test]
    fn test_reverse_static_routes() {
        let routes = table();
        assert_eq!(routes.len(), 4);
        assert_eq!(routes.reverse("home").as_deref(), Some("/"));
        assert_eq!(routes.reverse("page1").as_deref(), Some("/page1/"));
        assert_eq!(routes.reverse("missing"), None);
    }

    #[test]
    fn test_parameterized_route_cannot_be_reversed() {
        assert_eq!(table().reverse("article"), None);
    }

    #[test]
    fn test_resolve_with_or_without_trailing_separator() {
        let routes = table();
        assert_eq!(routes.resolve_route_name("/page1/").as_deref(), Some("page1"));
        assert_eq!(routes.resolve_route_name("/page1").as_deref(), Some("page1"));
        assert_eq!(routes.resolve_route_name("/").as_deref(), Some("home"));
        assert_eq!(routes.resolve_route_name("").as_deref(), Some("home"));
        assert_eq!(routes.resolve_route_name("/section1/subsection1/").as_deref(), Some("subsection1"));
        assert_eq!(routes.resolve_route_name("/section1/").as_deref(), None);
    }

    #[test]
    fn test_resolve_parameterized_route() {
        let routes = table();
        assert_eq!(routes.resolve_route_name("/articles/rust/").as_deref(), Some("article"));
        assert_eq!(routes.resolve_route_name("/articles/").as_deref(), None);
        assert_eq!(routes.resolve_route_name("/articles/a/b/").as_deref(), None);
    }

    #[test]
    fn test_literal_segments_are_escaped() {
        let mut routes = RouteTable::new();
        routes.add("dotted", "/v1.0/").unwrap();
        assert_eq!(routes.resolve_route_name("/v1.0/").as_deref(), Some("dotted"));
        assert_eq!(routes.resolve_route_name("/v100/"), None);
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        let mut routes = RouteTable::new();
        assert!(matches!(routes.add("relative", "page1/"), Err(RouteTableError::InvalidPattern { .. })));
        assert!(matches!(routes.add("open", "/a/{slug/"), Err(RouteTableError::InvalidPattern { .. })));
        assert!(matches!(routes.add("empty", "/a/{}/"), Err(RouteTableError::InvalidPattern { .. })));
        assert!(routes.is_empty());
    }

    #[test]
    fn test_first_declared_route_wins() {
        let mut routes = RouteTable::new();
        routes.add("first", "/same/").unwrap();
        routes.add("second", "/same/").unwrap();
        routes.add("first", "/other/").unwrap();
        assert_eq!(routes.resolve_route_name("/same/").as_deref(), Some("first"));
        assert_eq!(routes.reverse("first").as_deref(), Some("/same/"));
    }
}
