//! Domain errors

use thiserror::Error;

use crate::domain::{MenuId, MenuItemId};

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu not found: {0}")]
    MenuNotFound(String),

    #[error("Menu name already exists: {0}")]
    MenuNameAlreadyExists(String),

    #[error("Menu item not found: {0}")]
    ItemNotFound(MenuItemId),

    #[error("Menu item {item_id} does not belong to menu {menu_id}")]
    ItemNotInMenu { item_id: MenuItemId, menu_id: MenuId },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
