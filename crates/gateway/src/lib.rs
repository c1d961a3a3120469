//! API Gateway Library
//!
//! This crate provides the HTTP REST API over the tender and bid services.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use procurement_service_lib::config::ProcurementServiceConfig;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect the services and serve HTTP until the process stops.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service_config = ProcurementServiceConfig::from_env();
    let (_db, services) = procurement_service_lib::connect(&service_config).await?;

    let state = AppState::new(services, config.request_timeout());
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(service = %config.server.service_name, "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
