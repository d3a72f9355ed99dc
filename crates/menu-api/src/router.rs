use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::handlers::{health, menus, pages};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Admin + tree API
        .route("/api/v1/menus", get(menus::list_menus).post(menus::create_menu))
        .route("/api/v1/menus/{name}", delete(menus::delete_menu))
        .route("/api/v1/menus/{name}/items", post(menus::add_item))
        .route("/api/v1/menus/{name}/items/{item_id}", put(menus::update_item))
        .route("/api/v1/menus/{name}/tree", get(menus::menu_tree))
        // Rendered markup
        .route("/menus/{name}", get(pages::menu_fragment))
        .fallback(pages::site_page)
        .with_state(state)
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
