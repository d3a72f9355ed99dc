//! # Menu Core - Domain Module
//! 
//! Menu entities and the annotated tree handed to renderers.

pub mod menu;
pub mod menu_item;
pub mod menu_node;

// Re-export all entities
pub use menu::{Menu, MenuId, MenuSummary, MenuWithItems, NewMenu};
pub use menu_item::{creates_parent_cycle, MenuItem, MenuItemId, NewMenuItem};
pub use menu_node::{Forest, MenuNode, MenuTree};
