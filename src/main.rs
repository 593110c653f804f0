// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::{load_dashboard_config, load_server_config};
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let server_config = load_server_config()?;
    let dashboard_config = load_dashboard_config()?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server_config.server.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create stores and services (application layer)
    let state = Arc::new(AppState::seeded(&server_config, dashboard_config));

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = server_config.server.bind_address.parse()?;
    tracing::info!("Starting wastehub service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
