//! Active-item matching between menu items and the current request path

use tracing::debug;

use menu_shared::constants::{PATH_SEPARATOR, UNRESOLVED_HREF};

use crate::domain::MenuItem;
use crate::ports::UrlResolver;

/// Effective target of an item.
///
/// Explicit URLs are used verbatim; named routes go through the resolver.
/// `None` means the item cannot be resolved and never matches.
pub fn effective_url(item: &MenuItem, resolver: &dyn UrlResolver) -> Option<String> {
    if let Some(url) = item.explicit_url() {
        return Some(url.to_string());
    }

    let Some(route_name) = item.route_name() else {
        debug!(item_id = item.id, "Menu item has neither URL nor named URL");
        return None;
    };

    let path = resolver.reverse(route_name);
    if path.is_none() {
        debug!(item_id = item.id, route_name, "Named URL could not be reversed");
    }
    path
}

/// Drops one trailing path separator.
pub fn normalize_path(path: &str) -> &str {
    path.strip_suffix(PATH_SEPARATOR).unwrap_or(path)
}

/// Whether an item with the given effective URL is the page at `current_path`.
pub fn matches_current_path(
    item: &MenuItem,
    effective: Option<&str>,
    current_path: &str,
    resolver: &dyn UrlResolver,
) -> bool {
    let Some(url) = effective.filter(|u| !u.is_empty() && *u != UNRESOLVED_HREF) else {
        return false;
    };

    if normalize_path(url) == normalize_path(current_path) {
        return true;
    }

    match item.route_name() {
        Some(route_name) => resolver
            .resolve_route_name(current_path)
            .is_some_and(|current_route| current_route == route_name),
        None => false,
    }
}
