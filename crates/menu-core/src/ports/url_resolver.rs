//! URL resolver trait (port)

/// Maps named routes to paths and back.
///
/// Both directions report failure as `None`; callers treat that as
/// "no match" rather than an error.
#[cfg_attr(test, mockall::automock)]
pub trait UrlResolver: Send + Sync {
    /// Concrete path for a route name.
    fn reverse(&self, route_name: &str) -> Option<String>;

    /// Route name serving a request path.
    fn resolve_route_name(&self, path: &str) -> Option<String>;
}
