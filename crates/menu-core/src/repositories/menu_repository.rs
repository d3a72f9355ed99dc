//! Menu repository trait (port)

use async_trait::async_trait;

use crate::domain::{Menu, MenuId, MenuItem, MenuItemId, MenuSummary, MenuWithItems, NewMenu, NewMenuItem};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Menu plus every item, ordered by (sort order, title, id), in one round trip.
    async fn find_by_name_with_items(&self, name: &str) -> Result<Option<MenuWithItems>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Menu>, DomainError>;
    async fn find_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, DomainError>;
    async fn list_summaries(&self) -> Result<Vec<MenuSummary>, DomainError>;
    async fn create(&self, menu: &NewMenu) -> Result<Menu, DomainError>;
    /// Removes the menu and its items; `false` when no menu had that name.
    async fn delete_by_name(&self, name: &str) -> Result<bool, DomainError>;
    async fn create_item(&self, menu_id: MenuId, item: &NewMenuItem) -> Result<MenuItem, DomainError>;
    async fn update_item(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
}
