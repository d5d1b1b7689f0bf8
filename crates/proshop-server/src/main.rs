use actix_web::HttpServer;
use proshop::ApiEndpoints;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use proshop_server::{build_app, metrics::register_metrics, AppState, RouteTable, ServerConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration before anything binds
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let host = config.host.clone();
    let port = config.port;
    let shutdown_timeout = config.shutdown_timeout_secs;

    tracing::info!("Starting proshop-server in {} mode on {}:{}", config.mode, host, port);
    tracing::debug!("Configuration: {:?}", config);
    tracing::info!(
        "CORS allowed origins: {:?}",
        config.allowed_origins.iter().collect::<Vec<_>>()
    );
    tracing::info!("Serving uploads from: {}", config.uploads_dir.display());
    if config.mode.is_production() {
        tracing::info!("Serving SPA from: {}", config.spa_dir.display());
        if !config.spa_index().is_file() {
            tracing::warn!(
                "SPA entry document {} not found — unmatched routes will return 500",
                config.spa_index().display()
            );
        }
    }

    match ApiEndpoints::from_base(&config.public_base_url) {
        Ok(endpoints) => tracing::info!(
            "Frontend endpoints: products={} users={} orders={} paypal={}",
            endpoints.products_url,
            endpoints.users_url,
            endpoints.orders_url,
            endpoints.paypal_url
        ),
        Err(e) => tracing::warn!("PUBLIC_BASE_URL ignored: {}", e),
    }

    if let Err(e) = register_metrics() {
        tracing::warn!("Failed to register metrics: {}", e);
    }

    // Collaborator route modules are linked in by the storefront build; this
    // binary reserves their prefixes.
    let routes = RouteTable::detached();
    for mount in routes.mounts() {
        tracing::info!("Mounted {} routes at {}", mount.module.name(), mount.prefix);
    }

    let state = AppState::new(config, routes);

    // Start HTTP server. actix stops accepting on SIGINT/SIGTERM and drains
    // in-flight requests for up to `shutdown_timeout` seconds.
    HttpServer::new(move || build_app(state.clone()))
        .shutdown_timeout(shutdown_timeout)
        .bind((host.as_str(), port))?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
