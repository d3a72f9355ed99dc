// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: Tree-structured menu entry with URL or named-route target
// ============================================================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use menu_shared::constants::MAX_ITEM_FIELD_LENGTH;

// validator expects u64 length bounds
const MAX_ITEM_FIELD_LENGTH_U64: u64 = MAX_ITEM_FIELD_LENGTH as u64;

use super::menu::MenuId;
use crate::error::DomainError;

pub type MenuItemId = i64;

/// Menu item as supplied by the item store.
///
/// Exactly one of `url` / `named_url` is expected to be set. The tree builder
/// tolerates items that break this rule; they simply never resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub menu_id: MenuId,
    pub title: String,
    pub url: Option<String>,
    pub named_url: Option<String>,
    pub parent_id: Option<MenuItemId>,
    pub sort_order: i32,
}

impl MenuItem {
    /// Explicit URL, ignoring blank values.
    pub fn explicit_url(&self) -> Option<&str> {
        non_blank(self.url.as_deref())
    }

    /// Named-route token, ignoring blank values.
    pub fn route_name(&self) -> Option<&str> {
        non_blank(self.named_url.as_deref())
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Copy of this item with the editable fields replaced.
    pub fn with_changes(&self, changes: NewMenuItem) -> Self {
        Self {
            id: self.id,
            menu_id: self.menu_id,
            title: changes.title,
            url: changes.url,
            named_url: changes.named_url,
            parent_id: changes.parent_id,
            sort_order: changes.sort_order,
        }
    }

    /// Write-time link rules for an existing item.
    pub fn validate_links(&self, parent: Option<&MenuItem>) -> Result<(), DomainError> {
        check_links(
            Some(self.id),
            self.menu_id,
            self.explicit_url(),
            self.route_name(),
            self.parent_id,
            parent,
        )
    }
}

/// Payload for creating or editing a menu item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMenuItem {
    #[validate(length(min = 1, max = MAX_ITEM_FIELD_LENGTH_U64, message = "Title is empty or too long"))]
    pub title: String,

    #[validate(length(max = MAX_ITEM_FIELD_LENGTH_U64, message = "URL too long"))]
    #[serde(default)]
    pub url: Option<String>,

    #[validate(length(max = MAX_ITEM_FIELD_LENGTH_U64, message = "Named URL too long"))]
    #[serde(default)]
    pub named_url: Option<String>,

    #[serde(default)]
    pub parent_id: Option<MenuItemId>,

    #[serde(default)]
    pub sort_order: i32,
}

impl NewMenuItem {
    /// Trims text fields and turns blank targets into `None`.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            url: self.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()),
            named_url: self.named_url.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            parent_id: self.parent_id,
            sort_order: self.sort_order,
        }
    }

    /// Field and link rules for an item about to be created in `menu_id`.
    pub fn validate_for(&self, menu_id: MenuId, parent: Option<&MenuItem>) -> Result<(), DomainError> {
        self.validate()?;
        check_links(
            None,
            menu_id,
            non_blank(self.url.as_deref()),
            non_blank(self.named_url.as_deref()),
            self.parent_id,
            parent,
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Whether hanging `item_id` under `parent_id` would close a parent loop,
/// i.e. `parent_id` is the item itself or one of its descendants in `items`.
///
/// The walk is bounded by `items.len()`, so a loop already present in the
/// stored data cannot keep it spinning.
pub fn creates_parent_cycle(item_id: MenuItemId, parent_id: MenuItemId, items: &[MenuItem]) -> bool {
    let parents: HashMap<MenuItemId, Option<MenuItemId>> =
        items.iter().map(|item| (item.id, item.parent_id)).collect();

    let mut cursor = Some(parent_id);
    for _ in 0..=items.len() {
        match cursor {
            Some(id) if id == item_id => return true,
            Some(id) => cursor = parents.get(&id).copied().flatten(),
            None => return false,
        }
    }
    false
}

fn check_links(
    item_id: Option<MenuItemId>,
    menu_id: MenuId,
    url: Option<&str>,
    named_url: Option<&str>,
    parent_id: Option<MenuItemId>,
    parent: Option<&MenuItem>,
) -> Result<(), DomainError> {
    if url.is_none() && named_url.is_none() {
        return Err(DomainError::ValidationError(
            "Either a URL or a named URL is required".to_string(),
        ));
    }

    if let (Some(id), Some(parent_id)) = (item_id, parent_id) {
        if id == parent_id {
            return Err(DomainError::ValidationError(
                "An item cannot be its own parent".to_string(),
            ));
        }
    }

    match (parent_id, parent) {
        (Some(parent_id), None) => Err(DomainError::ItemNotFound(parent_id)),
        (_, Some(parent)) if parent.menu_id != menu_id => Err(DomainError::ValidationError(
            "Parent item must belong to the same menu".to_string(),
        )),
        _ => Ok(()),
    }
}
