mod config;
mod errors;
mod packing;
mod routes;
mod shutdown;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::packing::PackageCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; bad PACKAGE_SIZES or PORT stops startup here
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},tower_http={level}",
                env!("CARGO_PKG_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting packopt v{}", env!("CARGO_PKG_VERSION"));

    // The catalog is built once and shared read-only by every request
    let catalog = PackageCatalog::new(config.package_sizes.iter().copied())
        .context("failed to build package catalog")?;
    info!("Available package sizes: {:?}", catalog.sizes());
    info!("Maximum accepted quantity: {}", config.max_quantity);
    if !config.static_dir.join("index.html").is_file() {
        warn!(
            "Web UI not found at {}; set STATIC_DIR to serve it",
            config.static_dir.display()
        );
    }

    let state = AppState {
        catalog: Arc::new(catalog),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    info!(
        "API endpoint: http://localhost:{}/api/calculate?qty=<quantity>",
        config.port
    );
    info!("Web UI: http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::signal())
        .await?;

    info!("Server exited");
    Ok(())
}
