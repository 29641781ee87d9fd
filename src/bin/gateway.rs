//! ShareIt Gateway
//!
//! Validates requests and forwards them to the ShareIt server.

use std::net::SocketAddr;

use anyhow::Context;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use shareit::{
    config::AppConfig,
    gateway::{self, GatewayState},
    logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging).context("Failed to initialize logging")?;

    tracing::info!("Starting ShareIt Gateway v{}", env!("CARGO_PKG_VERSION"));

    let addr = SocketAddr::new(
        config.gateway.host.parse().context("Invalid host address")?,
        config.gateway.port,
    );

    let state = GatewayState::new(config).context("Failed to create ShareIt client")?;
    tracing::info!("Forwarding to {}", state.client.base_url());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = gateway::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    tracing::info!("Gateway listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
