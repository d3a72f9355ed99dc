//! Application-wide constants

/// Href rendered for items whose target cannot be resolved.
pub const UNRESOLVED_HREF: &str = "#";
pub const PATH_SEPARATOR: char = '/';
pub const DEFAULT_LOG_FILTER: &str = "info,menu_core=debug";
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;
pub const MAX_MENU_NAME_LENGTH: usize = 100;
pub const MAX_ITEM_FIELD_LENGTH: usize = 200;
