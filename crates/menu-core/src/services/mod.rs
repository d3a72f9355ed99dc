//! Domain services (business logic)

pub mod menu_service;
pub mod tree_builder;
pub mod url_matcher;

pub use menu_service::MenuService;
pub use tree_builder::build_tree;
pub use url_matcher::{effective_url, normalize_path};
