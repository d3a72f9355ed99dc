//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

use crate::constants::DEFAULT_ACQUIRE_TIMEOUT_SECS;
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub routes: Vec<RouteSettings>,
    #[serde(default)]
    pub site: SiteSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

/// A named route the URL resolver can reverse, e.g. `page1 -> /page1/`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RouteSettings {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteSettings {
    /// Menus drawn on every site page, in order.
    #[serde(default)]
    pub menus: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("MENU")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::checked(config.try_deserialize()?)
    }

    /// Builds a configuration from an inline TOML document layered over the defaults.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = Self::with_defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;
        Self::checked(config.try_deserialize()?)
    }

    fn checked(config: Self) -> Result<Self, AppError> {
        if config.database.max_connections == 0 {
            return Err(AppError::InvalidConfig("database.max_connections must be positive".into()));
        }
        if let Some(route) = config.routes.iter().find(|r| r.name.trim().is_empty()) {
            return Err(AppError::InvalidConfig(format!("route {} has no name", route.path)));
        }
        if config.site.menus.iter().any(|m| m.trim().is_empty()) {
            return Err(AppError::InvalidConfig("site.menus contains a blank menu name".into()));
        }
        Ok(config)
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, AppError> {
        Ok(Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "menu-server")?
            .set_default("database.url", "postgres://localhost/site_menu")?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_seconds", DEFAULT_ACQUIRE_TIMEOUT_SECS)?
            .set_default("database.run_migrations", true)?)
    }
}
