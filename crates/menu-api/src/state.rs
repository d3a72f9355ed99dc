use std::sync::Arc;

use menu_core::services::MenuService;
use menu_shared::config::SiteSettings;

#[derive(Clone)]
pub struct AppState {
    pub menu_service: Arc<MenuService>,
    pub site: SiteSettings,
}
