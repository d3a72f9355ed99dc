//! Ports for the collaborators the menu core calls out to

pub mod renderer;
pub mod url_resolver;

pub use renderer::{MenuRenderer, PageView, RenderedMenu};
pub use url_resolver::UrlResolver;
