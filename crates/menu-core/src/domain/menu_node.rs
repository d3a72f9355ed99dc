//! Annotated menu tree produced per render

use serde::Serialize;

use super::menu_item::MenuItem;

/// Ordered root nodes of one menu.
pub type Forest = Vec<MenuNode>;

/// One menu item placed in the tree, with its render flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    #[serde(flatten)]
    pub item: MenuItem,
    /// Effective target, or `#` when it cannot be resolved.
    pub href: String,
    /// Depth below the roots, starting at 0.
    pub level: usize,
    pub active: bool,
    pub expanded: bool,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// This node and all of its descendants, depth first.
    pub fn descendants(&self) -> Vec<&MenuNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.descendants());
        }
        out
    }
}

/// Forest for a single menu and request path, as handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuTree {
    pub menu_name: String,
    pub current_path: String,
    pub nodes: Forest,
}

impl MenuTree {
    pub fn new(menu_name: &str, current_path: &str, nodes: Forest) -> Self {
        Self {
            menu_name: menu_name.to_string(),
            current_path: current_path.to_string(),
            nodes,
        }
    }

    /// Tree for a menu that does not exist.
    pub fn empty(menu_name: &str, current_path: &str) -> Self {
        Self::new(menu_name, current_path, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in the forest, depth first.
    pub fn iter(&self) -> impl Iterator<Item = &MenuNode> {
        self.nodes.iter().flat_map(MenuNode::descendants)
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn active(&self) -> Option<&MenuNode> {
        self.iter().find(|node| node.active)
    }
}
