// ============================================================================
// Menu Core - Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Menu lookup, tree annotation, rendering, and admin writes

use std::sync::Arc;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::domain::{creates_parent_cycle, Menu, MenuItem, MenuItemId, MenuSummary, MenuTree, NewMenu, NewMenuItem};
use crate::error::DomainError;
use crate::ports::{MenuRenderer, PageView, RenderedMenu, UrlResolver};
use crate::repositories::MenuRepository;
use super::tree_builder::build_tree;

/// Entry point for page templates and the admin API
pub struct MenuService {
    menu_repo: Arc<dyn MenuRepository>,
    resolver: Arc<dyn UrlResolver>,
    renderer: Arc<dyn MenuRenderer>,
}

impl MenuService {
    pub fn new(
        menu_repo: Arc<dyn MenuRepository>,
        resolver: Arc<dyn UrlResolver>,
        renderer: Arc<dyn MenuRenderer>,
    ) -> Self {
        Self {
            menu_repo,
            resolver,
            renderer,
        }
    }

    /// Annotated tree for `menu_name` at `current_path`.
    ///
    /// An unknown menu yields an empty tree; only store failures are errors.
    pub async fn load_tree(&self, menu_name: &str, current_path: &str) -> Result<MenuTree, DomainError> {
        let Some(found) = self.menu_repo.find_by_name_with_items(menu_name).await? else {
            info!("Menu not found, rendering empty: {}", menu_name);
            return Ok(MenuTree::empty(menu_name, current_path));
        };

        let nodes = build_tree(&found.items, current_path, self.resolver.as_ref());
        debug!("Built menu {} with {} items for {}", menu_name, found.items.len(), current_path);
        Ok(MenuTree::new(&found.menu.name, current_path, nodes))
    }

    /// Markup for one menu. Never fails: store or template problems degrade
    /// to an empty menu so the surrounding page still renders.
    pub async fn render_menu(&self, menu_name: &str, current_path: &str) -> String {
        let tree = match self.load_tree(menu_name, current_path).await {
            Ok(tree) => tree,
            Err(e) => {
                error!("Failed to load menu {}: {}", menu_name, e);
                MenuTree::empty(menu_name, current_path)
            }
        };

        self.renderer.render_menu(&tree).unwrap_or_else(|e| {
            error!("Failed to render menu {}: {}", menu_name, e);
            String::new()
        })
    }

    /// A full page drawing each of `menu_names` for `current_path`.
    pub async fn render_page(&self, current_path: &str, menu_names: &[String]) -> String {
        let mut menus = Vec::with_capacity(menu_names.len());
        for name in menu_names {
            menus.push(RenderedMenu {
                name: name.clone(),
                html: self.render_menu(name, current_path).await,
            });
        }

        let page = PageView {
            current_path: current_path.to_string(),
            menus,
        };
        self.renderer.render_page(&page).unwrap_or_else(|e| {
            error!("Failed to render page {}: {}", current_path, e);
            String::new()
        })
    }

    pub async fn list_menus(&self) -> Result<Vec<MenuSummary>, DomainError> {
        self.menu_repo.list_summaries().await
    }

    pub async fn create_menu(&self, name: &str) -> Result<Menu, DomainError> {
        let new_menu = NewMenu::new(name)?;

        if self.menu_repo.find_by_name(&new_menu.name).await?.is_some() {
            warn!("Menu creation failed: name already exists: {}", new_menu.name);
            return Err(DomainError::MenuNameAlreadyExists(new_menu.name));
        }

        let menu = self.menu_repo.create(&new_menu).await?;
        info!("Menu created: {} ({})", menu.name, menu.id);
        Ok(menu)
    }

    pub async fn delete_menu(&self, name: &str) -> Result<(), DomainError> {
        if !self.menu_repo.delete_by_name(name).await? {
            return Err(DomainError::MenuNotFound(name.to_string()));
        }
        info!("Menu deleted with all items: {}", name);
        Ok(())
    }

    pub async fn add_item(&self, menu_name: &str, item: NewMenuItem) -> Result<MenuItem, DomainError> {
        let menu = self.require_menu(menu_name).await?;
        let item = item.normalized();
        let parent = self.find_parent(item.parent_id).await?;

        item.validate_for(menu.id, parent.as_ref())?;

        let created = self.menu_repo.create_item(menu.id, &item).await?;
        info!("Menu item created: {} in {}", created.id, menu.name);
        Ok(created)
    }

    pub async fn update_item(
        &self,
        menu_name: &str,
        item_id: MenuItemId,
        changes: NewMenuItem,
    ) -> Result<MenuItem, DomainError> {
        let menu = self.require_menu(menu_name).await?;
        let existing = self
            .menu_repo
            .find_item(item_id)
            .await?
            .ok_or(DomainError::ItemNotFound(item_id))?;

        if existing.menu_id != menu.id {
            return Err(DomainError::ItemNotInMenu { item_id, menu_id: menu.id });
        }

        let changes = changes.normalized();
        changes.validate()?;

        let updated = existing.with_changes(changes);
        let parent = self.find_parent(updated.parent_id).await?;
        updated.validate_links(parent.as_ref())?;
        if let Some(parent_id) = updated.parent_id {
            self.ensure_no_parent_cycle(&menu, item_id, parent_id).await?;
        }

        let saved = self.menu_repo.update_item(&updated).await?;
        info!("Menu item updated: {} in {}", saved.id, menu.name);
        Ok(saved)
    }

    async fn require_menu(&self, name: &str) -> Result<Menu, DomainError> {
        self.menu_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::MenuNotFound(name.to_string()))
    }

    async fn ensure_no_parent_cycle(
        &self,
        menu: &Menu,
        item_id: MenuItemId,
        parent_id: MenuItemId,
    ) -> Result<(), DomainError> {
        let items = self
            .menu_repo
            .find_by_name_with_items(&menu.name)
            .await?
            .map(|found| found.items)
            .unwrap_or_default();

        if creates_parent_cycle(item_id, parent_id, &items) {
            warn!("Rejected move of item {} under its descendant {}", item_id, parent_id);
            return Err(DomainError::ValidationError(
                "An item cannot be moved under one of its own descendants".to_string(),
            ));
        }
        Ok(())
    }

    async fn find_parent(&self, parent_id: Option<MenuItemId>) -> Result<Option<MenuItem>, DomainError> {
        match parent_id {
            Some(id) => self.menu_repo.find_item(id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::{MenuId, MenuWithItems};
    use crate::ports::renderer::MockMenuRenderer;
    use crate::ports::url_resolver::MockUrlResolver;
    use crate::repositories::MockMenuRepository;

    fn menu(id: MenuId, name: &str) -> Menu {
        Menu {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    fn item(id: MenuItemId, menu_id: MenuId, title: &str, url: &str, parent_id: Option<MenuItemId>) -> MenuItem {
        MenuItem {
            id,
            menu_id,
            title: title.to_string(),
            url: Some(url.to_string()),
            named_url: None,
            parent_id,
            sort_order: 0,
        }
    }

    fn new_item(title: &str, url: Option<&str>, parent_id: Option<MenuItemId>) -> NewMenuItem {
        NewMenuItem {
            title: title.to_string(),
            url: url.map(String::from),
            named_url: None,
            parent_id,
            sort_order: 0,
        }
    }

    /// Renderer that lists node titles, marking the active one with `*`.
    fn listing_renderer() -> MockMenuRenderer {
        let mut renderer = MockMenuRenderer::new();
        renderer.expect_render_menu().returning(|tree| {
            Ok(tree
                .iter()
                .map(|n| if n.active { format!("*{}", n.item.title) } else { n.item.title.clone() })
                .collect::<Vec<_>>()
                .join(","))
        });
        renderer.expect_render_page().returning(|page| {
            Ok(page
                .menus
                .iter()
                .map(|m| format!("{}=[{}]", m.name, m.html))
                .collect::<Vec<_>>()
                .join(";"))
        });
        renderer
    }

    fn service(repo: MockMenuRepository, renderer: MockMenuRenderer) -> MenuService {
        let mut resolver = MockUrlResolver::new();
        resolver.expect_reverse().returning(|_| None);
        resolver.expect_resolve_route_name().returning(|_| None);
        MenuService::new(Arc::new(repo), Arc::new(resolver), Arc::new(renderer))
    }

    fn main_menu_repo() -> MockMenuRepository {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name_with_items()
            .with(eq("main_menu"))
            .times(1)
            .returning(|_| {
                Ok(Some(MenuWithItems {
                    menu: menu(1, "main_menu"),
                    items: vec![
                        item(1, 1, "Tech", "/tech/", None),
                        item(2, 1, "Phone", "/tech/phone/", Some(1)),
                    ],
                }))
            });
        repo
    }

    #[tokio::test]
    async fn test_load_tree_uses_single_fetch() {
        let service = service(main_menu_repo(), MockMenuRenderer::new());

        let tree = service.load_tree("main_menu", "/tech/phone/").await.unwrap();
        assert_eq!(tree.menu_name, "main_menu");
        assert_eq!(tree.current_path, "/tech/phone/");
        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.active().map(|n| n.item.id), Some(2));
        assert!(tree.nodes[0].expanded);
    }

    #[tokio::test]
    async fn test_unknown_menu_gives_empty_tree() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name_with_items().returning(|_| Ok(None));
        let service = service(repo, MockMenuRenderer::new());

        let tree = service.load_tree("missing", "/").await.unwrap();
        assert!(tree.is_empty());
    }

    #[tokio::test]
    async fn test_render_menu_marks_active_item() {
        let service = service(main_menu_repo(), listing_renderer());
        assert_eq!(service.render_menu("main_menu", "/tech/").await, "*Tech,Phone");
    }

    #[tokio::test]
    async fn test_render_menu_degrades_on_store_failure() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name_with_items()
            .returning(|_| Err(DomainError::DatabaseError("connection refused".into())));
        let service = service(repo, listing_renderer());

        assert_eq!(service.render_menu("main_menu", "/").await, "");
    }

    #[tokio::test]
    async fn test_render_menu_degrades_on_template_failure() {
        let mut renderer = MockMenuRenderer::new();
        renderer
            .expect_render_menu()
            .returning(|_| Err(DomainError::RenderError("bad template".into())));
        let service = service(main_menu_repo(), renderer);

        assert_eq!(service.render_menu("main_menu", "/").await, "");
    }

    #[tokio::test]
    async fn test_render_page_draws_each_menu() {
        let mut repo = main_menu_repo();
        repo.expect_find_by_name_with_items()
            .with(eq("footer"))
            .returning(|_| Ok(None));
        let service = service(repo, listing_renderer());

        let page = service
            .render_page("/tech/phone/", &["main_menu".to_string(), "footer".to_string()])
            .await;
        assert_eq!(page, "main_menu=[Tech,*Phone];footer=[]");
    }

    #[tokio::test]
    async fn test_create_menu_rejects_duplicate_name() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name()
            .with(eq("main_menu"))
            .returning(|_| Ok(Some(menu(1, "main_menu"))));
        repo.expect_create().never();
        let service = service(repo, MockMenuRenderer::new());

        let result = service.create_menu(" main_menu ").await;
        assert!(matches!(result, Err(DomainError::MenuNameAlreadyExists(name)) if name == "main_menu"));
    }

    #[tokio::test]
    async fn test_create_menu_validates_name() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name().never();
        let service = service(repo, MockMenuRenderer::new());

        assert!(matches!(service.create_menu("  ").await, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_menu() {
        let mut repo = MockMenuRepository::new();
        repo.expect_delete_by_name().returning(|_| Ok(false));
        let service = service(repo, MockMenuRenderer::new());

        assert!(matches!(service.delete_menu("gone").await, Err(DomainError::MenuNotFound(_))));
    }

    #[tokio::test]
    async fn test_add_item_validates_and_persists() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(Some(menu(1, "main_menu"))));
        repo.expect_find_item()
            .with(eq(1))
            .returning(|_| Ok(Some(item(1, 1, "Tech", "/tech/", None))));
        repo.expect_create_item()
            .withf(|menu_id, item| *menu_id == 1 && item.title == "Phone" && item.parent_id == Some(1))
            .times(1)
            .returning(|menu_id, item| Ok(item_from(10, menu_id, item)));
        let service = service(repo, MockMenuRenderer::new());

        let created = service
            .add_item("main_menu", new_item(" Phone ", Some("/tech/phone/"), Some(1)))
            .await
            .unwrap();
        assert_eq!(created.id, 10);
        assert_eq!(created.title, "Phone");
    }

    #[tokio::test]
    async fn test_add_item_rejects_parent_from_other_menu() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(Some(menu(1, "main_menu"))));
        repo.expect_find_item()
            .returning(|_| Ok(Some(item(7, 2, "Elsewhere", "/x/", None))));
        repo.expect_create_item().never();
        let service = service(repo, MockMenuRenderer::new());

        let result = service.add_item("main_menu", new_item("Phone", Some("/p/"), Some(7))).await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_add_item_requires_target() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(Some(menu(1, "main_menu"))));
        repo.expect_create_item().never();
        let service = service(repo, MockMenuRenderer::new());

        let result = service.add_item("main_menu", new_item("Empty", Some("  "), None)).await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_item_rejects_self_parent() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(Some(menu(1, "main_menu"))));
        repo.expect_find_item()
            .with(eq(3))
            .returning(|_| Ok(Some(item(3, 1, "Tech", "/tech/", None))));
        repo.expect_update_item().never();
        let service = service(repo, MockMenuRenderer::new());

        let result = service
            .update_item("main_menu", 3, new_item("Tech", Some("/tech/"), Some(3)))
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_item_rejects_move_under_descendant() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(Some(menu(1, "main_menu"))));
        repo.expect_find_item()
            .with(eq(1))
            .returning(|_| Ok(Some(item(1, 1, "Tech", "/tech/", None))));
        repo.expect_find_item()
            .with(eq(2))
            .returning(|_| Ok(Some(item(2, 1, "Phone", "/tech/phone/", Some(1)))));
        repo.expect_find_by_name_with_items()
            .with(eq("main_menu"))
            .times(1)
            .returning(|_| {
                Ok(Some(MenuWithItems {
                    menu: menu(1, "main_menu"),
                    items: vec![
                        item(1, 1, "Tech", "/tech/", None),
                        item(2, 1, "Phone", "/tech/phone/", Some(1)),
                    ],
                }))
            });
        repo.expect_update_item().never();
        let service = service(repo, MockMenuRenderer::new());

        let result = service
            .update_item("main_menu", 1, new_item("Tech", Some("/tech/"), Some(2)))
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(msg)) if msg.contains("descendants")));
    }

    #[tokio::test]
    async fn test_update_item_moves_under_sibling() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(Some(menu(1, "main_menu"))));
        repo.expect_find_item()
            .with(eq(2))
            .returning(|_| Ok(Some(item(2, 1, "Phone", "/tech/phone/", Some(1)))));
        repo.expect_find_item()
            .with(eq(3))
            .returning(|_| Ok(Some(item(3, 1, "TV", "/tech/tv/", Some(1)))));
        repo.expect_find_by_name_with_items().returning(|_| {
            Ok(Some(MenuWithItems {
                menu: menu(1, "main_menu"),
                items: vec![
                    item(1, 1, "Tech", "/tech/", None),
                    item(2, 1, "Phone", "/tech/phone/", Some(1)),
                    item(3, 1, "TV", "/tech/tv/", Some(1)),
                ],
            }))
        });
        repo.expect_update_item()
            .withf(|item| item.id == 3 && item.parent_id == Some(2))
            .times(1)
            .returning(|item| Ok(item.clone()));
        let service = service(repo, MockMenuRenderer::new());

        let moved = service
            .update_item("main_menu", 3, new_item("TV", Some("/tech/tv/"), Some(2)))
            .await
            .unwrap();
        assert_eq!(moved.parent_id, Some(2));
    }

    #[tokio::test]
    async fn test_update_item_must_belong_to_menu() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(Some(menu(1, "main_menu"))));
        repo.expect_find_item()
            .returning(|_| Ok(Some(item(3, 2, "Other", "/other/", None))));
        let service = service(repo, MockMenuRenderer::new());

        let result = service
            .update_item("main_menu", 3, new_item("Other", Some("/o/"), None))
            .await;
        assert!(matches!(result, Err(DomainError::ItemNotInMenu { item_id: 3, menu_id: 1 })));
    }

    fn item_from(id: MenuItemId, menu_id: MenuId, new: &NewMenuItem) -> MenuItem {
        MenuItem {
            id,
            menu_id,
            title: new.title.clone(),
            url: new.url.clone(),
            named_url: new.named_url.clone(),
            parent_id: new.parent_id,
            sort_order: new.sort_order,
        }
    }
}
