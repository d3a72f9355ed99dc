// ============================================================================
// Menu Core - Menu Entity
// File: crates/menu-core/src/domain/menu.rs
// Description: Named menu and its admin summary
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use menu_shared::constants::MAX_MENU_NAME_LENGTH;

// validator expects u64 length bounds
const MAX_MENU_NAME_LENGTH_U64: u64 = MAX_MENU_NAME_LENGTH as u64;

use super::menu_item::MenuItem;

pub type MenuId = i64;

/// Menu entity, looked up by its unique name from page templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a menu
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMenu {
    #[validate(length(min = 1, max = MAX_MENU_NAME_LENGTH_U64, message = "Menu name is empty or too long"))]
    pub name: String,
}

impl NewMenu {
    pub fn new(name: &str) -> Result<Self, validator::ValidationErrors> {
        let menu = Self { name: name.trim().to_string() };
        menu.validate()?;
        Ok(menu)
    }
}

/// A menu together with all of its items, ordered by (sort order, title, id).
#[derive(Debug, Clone)]
pub struct MenuWithItems {
    pub menu: Menu,
    pub items: Vec<MenuItem>,
}

/// Admin listing row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuSummary {
    pub id: MenuId,
    pub name: String,
    pub items_count: i64,
    pub root_items_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_menu_trims_name() {
        let menu = NewMenu::new("  main_menu ").unwrap();
        assert_eq!(menu.name, "main_menu");
    }

    #[test]
    fn test_new_menu_rejects_blank_and_long_names() {
        assert!(NewMenu::new("   ").is_err());
        assert!(NewMenu::new(&"m".repeat(MAX_MENU_NAME_LENGTH + 1)).is_err());
        assert!(NewMenu::new(&"m".repeat(MAX_MENU_NAME_LENGTH)).is_ok());
    }
}
