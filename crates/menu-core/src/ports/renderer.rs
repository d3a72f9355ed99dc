//! Renderer trait (port)

use serde::Serialize;

use crate::domain::MenuTree;
use crate::error::DomainError;

/// Markup for one menu, already rendered.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMenu {
    pub name: String,
    pub html: String,
}

/// A site page drawing several menus for one request path.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub current_path: String,
    pub menus: Vec<RenderedMenu>,
}

#[cfg_attr(test, mockall::automock)]
pub trait MenuRenderer: Send + Sync {
    fn render_menu(&self, tree: &MenuTree) -> Result<String, DomainError>;

    fn render_page(&self, page: &PageView) -> Result<String, DomainError>;
}
