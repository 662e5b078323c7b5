//! Meterbill Service Binary
//!
//! Serves cost comparisons for seeded smart meter readings.

use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meterbill_server::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meterbill_server=info,meterbill_pricing=info,tower_http=info".into()),
        )
        .init();

    info!("Starting Meterbill service v{}", meterbill_common::VERSION);

    let config = ServerConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API listening on {}", addr);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Received shutdown signal");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutting down Meterbill service");
    Ok(())
}
