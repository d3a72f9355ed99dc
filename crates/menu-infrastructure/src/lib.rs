//! # Menu Infrastructure
//! 
//! PostgreSQL item store, named-route table, and handlebars renderer (adapters).

pub mod database;
pub mod rendering;
pub mod routing;

pub use database::{create_pool, run_migrations, PgMenuRepository};
pub use rendering::HandlebarsMenuRenderer;
pub use routing::{RouteTable, RouteTableError};
