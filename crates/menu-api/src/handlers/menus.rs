// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menus.rs
// ============================================================================
//! Admin endpoints and the JSON menu tree

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use menu_core::domain::{Menu, MenuItem, MenuItemId, MenuSummary, MenuTree, NewMenuItem};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create menu payload
#[derive(Debug, Deserialize)]
pub struct CreateMenuRequest {
    pub name: String,
}

/// Current request path the tree is annotated for
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    #[serde(default)]
    pub path: String,
}

/// List menus - GET /api/v1/menus
pub async fn list_menus(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuSummary>>>, ApiError> {
    let menus = state.menu_service.list_menus().await?;
    Ok(Json(ApiResponse::success(menus)))
}

/// Create menu - POST /api/v1/menus
pub async fn create_menu(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenuRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Menu>>), ApiError> {
    let menu = state.menu_service.create_menu(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(menu))))
}

/// Delete menu with all items - DELETE /api/v1/menus/{name}
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.menu_service.delete_menu(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add item - POST /api/v1/menus/{name}/items
pub async fn add_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<NewMenuItem>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItem>>), ApiError> {
    let item = state.menu_service.add_item(&name, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// Edit item - PUT /api/v1/menus/{name}/items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    Path((name, item_id)): Path<(String, MenuItemId)>,
    Json(payload): Json<NewMenuItem>,
) -> Result<Json<ApiResponse<MenuItem>>, ApiError> {
    let item = state.menu_service.update_item(&name, item_id, payload).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// Annotated tree - GET /api/v1/menus/{name}/tree?path=/current/
///
/// An unknown menu answers with an empty tree, as page templates see it.
pub async fn menu_tree(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PathQuery>,
) -> Result<Json<ApiResponse<MenuTree>>, ApiError> {
    info!("Menu tree requested: {} at {}", name, query.path);
    let tree = state.menu_service.load_tree(&name, &query.path).await?;
    Ok(Json(ApiResponse::success(tree)))
}
