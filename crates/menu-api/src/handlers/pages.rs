//! HTML endpoints: single menu fragments and site pages

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::Html,
};

use super::menus::PathQuery;
use crate::state::AppState;

/// Rendered menu - GET /menus/{name}?path=/current/
pub async fn menu_fragment(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PathQuery>,
) -> Html<String> {
    Html(state.menu_service.render_menu(&name, &query.path).await)
}

/// Any other path: a page drawing the configured site menus for that path.
pub async fn site_page(State(state): State<AppState>, uri: Uri) -> Html<String> {
    Html(
        state
            .menu_service
            .render_page(uri.path(), &state.site.menus)
            .await,
    )
}
