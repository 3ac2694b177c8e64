//! Salon HTTP Server Binary
//!
//! Entry point for the salon reservation REST API server. It initializes
//! the repository, loads the scheduling configuration, sets up the HTTP
//! router and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin salon-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `SCHEDULING_CONFIG`: Path to scheduling.toml (default: search standard locations)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use salon_rust::config::SchedulingConfig;
use salon_rust::db;
use salon_rust::http::{create_router, AppState};
use salon_rust::services::ReservationLifecycleManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting salon HTTP server");

    // Initialize global repository once and reuse it across the app
    db::init_repository()?;
    let repository = Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    // Load scheduling configuration
    let config = match env::var("SCHEDULING_CONFIG") {
        Ok(path) => SchedulingConfig::from_file(&path)?,
        Err(_) => SchedulingConfig::from_default_location().unwrap_or_else(|e| {
            warn!("No scheduling configuration found ({}); salon is closed until configured", e);
            SchedulingConfig::default()
        }),
    };

    // Create application state
    let engine = Arc::new(ReservationLifecycleManager::new(repository.clone(), config));
    let state = AppState::new(engine, repository);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
