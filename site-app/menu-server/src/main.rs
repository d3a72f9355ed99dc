use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use menu_api::{build_router, AppState};
use menu_core::services::MenuService;
use menu_infrastructure::{create_pool, run_migrations, HandlebarsMenuRenderer, PgMenuRepository, RouteTable};
use menu_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize telemetry
    let _guard = menu_shared::telemetry::init_telemetry();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("{} starting ({})...", config.app.name, config.app.env);

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
        info!("Database migrations applied.");
    }

    // Named routes for menu items that link by route name
    let routes = RouteTable::from_settings(&config.routes)?;
    info!("Loaded {} named routes", routes.len());

    let menu_service = MenuService::new(
        Arc::new(PgMenuRepository::new(pool)),
        Arc::new(routes),
        Arc::new(HandlebarsMenuRenderer::new()?),
    );

    let state = AppState {
        menu_service: Arc::new(menu_service),
        site: config.site.clone(),
    };

    let app = build_router(state)
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
