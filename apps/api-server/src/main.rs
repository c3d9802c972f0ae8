//! # PharmaPOS API Server
//!
//! REST server for the pharmacy catalog, dashboard and sales.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Server                                       │
//! │                                                                         │
//! │  Client ───► HTTP (5000) ───► routes ───► pharma-sales ───► SQLite    │
//! │                                  │              │                       │
//! │                                  └──► pharma-core (metrics, carts)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod routes;
mod state;

use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pharma_store::{Database, DbConfig};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting PharmaPOS API server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        db_path = %config.database_path.display(),
        "Configuration loaded"
    );

    // Connect to the catalog database (runs migrations on connect)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Connected to catalog database");

    let state = AppState::new(db);
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server running");

    axum::serve(listener, app).await?;

    Ok(())
}
