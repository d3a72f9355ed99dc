//! Markup rendering (handlebars)

pub mod handlebars_renderer;
mod templates;

pub use handlebars_renderer::HandlebarsMenuRenderer;
