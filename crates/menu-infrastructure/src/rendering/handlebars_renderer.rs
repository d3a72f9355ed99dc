// ============================================================================
// Menu Infrastructure - Handlebars Renderer
// File: crates/menu-infrastructure/src/rendering/handlebars_renderer.rs
// ============================================================================

use handlebars::Handlebars;
use tracing::debug;

use menu_core::domain::MenuTree;
use menu_core::error::DomainError;
use menu_core::ports::{MenuRenderer, PageView};

use super::templates::{
    MENU_NODE_PARTIAL, MENU_NODE_PARTIAL_NAME, MENU_TEMPLATE, MENU_TEMPLATE_NAME, PAGE_TEMPLATE,
    PAGE_TEMPLATE_NAME,
};

/// Renders menu trees as nested `<ul>` lists.
///
/// The node partial recurses into `children`, so any depth renders with the
/// same markup.
pub struct HandlebarsMenuRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsMenuRenderer {
    /// Renderer using the built-in templates.
    pub fn new() -> Result<Self, DomainError> {
        Self::with_templates(MENU_TEMPLATE, MENU_NODE_PARTIAL, PAGE_TEMPLATE)
    }

    /// Renderer with custom templates. The node partial is registered as
    /// `menu_node` and receives one serialized node as its context.
    pub fn with_templates(menu: &str, node: &str, page: &str) -> Result<Self, DomainError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(MENU_TEMPLATE_NAME, menu)
            .map_err(template_error)?;
        registry
            .register_partial(MENU_NODE_PARTIAL_NAME, node)
            .map_err(template_error)?;
        registry
            .register_template_string(PAGE_TEMPLATE_NAME, page)
            .map_err(template_error)?;
        Ok(Self { registry })
    }
}

fn template_error(e: handlebars::TemplateError) -> DomainError {
    DomainError::RenderError(format!("invalid template: {}", e))
}

fn render_error(e: handlebars::RenderError) -> DomainError {
    DomainError::RenderError(e.to_string())
}

impl MenuRenderer for HandlebarsMenuRenderer {
    fn render_menu(&self, tree: &MenuTree) -> Result<String, DomainError> {
        debug!("Rendering menu {} ({} nodes)", tree.menu_name, tree.node_count());
        self.registry
            .render(MENU_TEMPLATE_NAME, tree)
            .map_err(render_error)
    }

    fn render_page(&self, page: &PageView) -> Result<String, DomainError> {
        self.registry
            .render(PAGE_TEMPLATE_NAME, page)
            .map_err(render_error)
    }
}
