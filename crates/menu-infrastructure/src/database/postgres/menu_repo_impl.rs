// ============================================================================
// Menu Infrastructure - PostgreSQL Menu Repository
// File: crates/menu-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info};

use menu_core::domain::{
    Menu, MenuId, MenuItem, MenuItemId, MenuSummary, MenuWithItems, NewMenu, NewMenuItem,
};
use menu_core::error::DomainError;
use menu_core::repositories::MenuRepository;

const ITEM_COLUMNS: &str = "id, menu_id, parent_id, title, url, named_url, sort_order";

/// Menu plus every item in one round trip. The trailing `i.id` keeps sibling
/// order stable when sort order and title tie.
const MENU_TREE_QUERY: &str = r#"
    SELECT
        m.id AS menu_id, m.name AS menu_name, m.created_at AS menu_created_at,
        i.id AS item_id, i.parent_id, i.title, i.url, i.named_url, i.sort_order
    FROM menus m
    LEFT JOIN menu_items i ON i.menu_id = m.id
    WHERE m.name = $1
    ORDER BY i.sort_order ASC NULLS FIRST, i.title ASC, i.id ASC
"#;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: i64,
    pub menu_id: i64,
    pub parent_id: Option<i64>,
    pub title: String,
    pub url: String,
    pub named_url: String,
    pub sort_order: i32,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            menu_id: row.menu_id,
            title: row.title,
            url: non_blank(row.url),
            named_url: non_blank(row.named_url),
            parent_id: row.parent_id,
            sort_order: row.sort_order,
        }
    }
}

/// One row of the menu ⟕ items join; item columns are NULL for an empty menu.
#[derive(Debug, FromRow)]
struct MenuTreeRow {
    pub menu_id: i64,
    pub menu_name: String,
    pub menu_created_at: DateTime<Utc>,
    pub item_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub named_url: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, FromRow)]
struct MenuSummaryRow {
    pub id: i64,
    pub name: String,
    pub items_count: i64,
    pub root_items_count: i64,
}

fn non_blank(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Folds join rows (already in sibling order) into a menu and its items.
fn assemble(rows: Vec<MenuTreeRow>) -> Option<MenuWithItems> {
    let first = rows.first()?;
    let menu = Menu {
        id: first.menu_id,
        name: first.menu_name.clone(),
        created_at: first.menu_created_at,
    };

    let items = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.item_id?;
            Some(MenuItem {
                id,
                menu_id: row.menu_id,
                title: row.title.unwrap_or_default(),
                url: row.url.and_then(non_blank),
                named_url: row.named_url.and_then(non_blank),
                parent_id: row.parent_id,
                sort_order: row.sort_order.unwrap_or_default(),
            })
        })
        .collect();

    Some(MenuWithItems { menu, items })
}

fn db_error(context: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn find_by_name_with_items(&self, name: &str) -> Result<Option<MenuWithItems>, DomainError> {
        let rows: Vec<MenuTreeRow> = sqlx::query_as(MENU_TREE_QUERY)
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading menu tree"))?;

        debug!("Fetched {} rows for menu {}", rows.len(), name);
        Ok(assemble(rows))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            "SELECT id, name, created_at FROM menus WHERE name = $1"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding menu by name"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            &format!("SELECT {} FROM menu_items WHERE id = $1", ITEM_COLUMNS)
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding menu item"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_summaries(&self) -> Result<Vec<MenuSummary>, DomainError> {
        let rows: Vec<MenuSummaryRow> = sqlx::query_as(
            r#"
            SELECT
                m.id, m.name,
                COUNT(i.id) AS items_count,
                COUNT(i.id) FILTER (WHERE i.parent_id IS NULL) AS root_items_count
            FROM menus m
            LEFT JOIN menu_items i ON i.menu_id = m.id
            GROUP BY m.id, m.name
            ORDER BY m.name ASC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing menus"))?;

        Ok(rows
            .into_iter()
            .map(|r| MenuSummary {
                id: r.id,
                name: r.name,
                items_count: r.items_count,
                root_items_count: r.root_items_count,
            })
            .collect())
    }

    async fn create(&self, menu: &NewMenu) -> Result<Menu, DomainError> {
        info!("Creating menu: {}", menu.name);

        let row: MenuRow = sqlx::query_as(
            "INSERT INTO menus (name) VALUES ($1) RETURNING id, name, created_at"
        )
        .bind(&menu.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating menu: {}", e);
            match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::MenuNameAlreadyExists(menu.name.clone())
                }
                _ => DomainError::DatabaseError(e.to_string()),
            }
        })?;

        Ok(row.into())
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM menus WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting menu"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_item(&self, menu_id: MenuId, item: &NewMenuItem) -> Result<MenuItem, DomainError> {
        let row: MenuItemRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO menu_items (menu_id, parent_id, title, url, named_url, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(menu_id)
        .bind(item.parent_id)
        .bind(&item.title)
        .bind(item.url.as_deref().unwrap_or_default())
        .bind(item.named_url.as_deref().unwrap_or_default())
        .bind(item.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating menu item"))?;

        info!("Menu item created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update_item(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let row: MenuItemRow = sqlx::query_as(&format!(
            r#"
            UPDATE menu_items
            SET
                parent_id = $2,
                title = $3,
                url = $4,
                named_url = $5,
                sort_order = $6
            WHERE id = $1
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(item.id)
        .bind(item.parent_id)
        .bind(&item.title)
        .bind(item.url.as_deref().unwrap_or_default())
        .bind(item.named_url.as_deref().unwrap_or_default())
        .bind(item.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("updating menu item"))?;

        Ok(row.into())
    }
}
