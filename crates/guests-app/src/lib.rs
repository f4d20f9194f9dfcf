//! Guests App Library
//!
//! HTTP endpoint that provisions guest accounts in the user directory.

pub mod clients;
pub mod config;
pub mod handlers;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::clients::DirectoryClient;
use crate::config::GuestsAppConfig;
use crate::routes::create_router;
use crate::service::{GuestProvisioner, RandomGenerator};
use crate::state::AppState;

/// Run the guests app as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    directory_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GuestsAppConfig::from_env();
    config.directory.endpoint = format!("http://{}:{}", local_host(host), directory_port);

    run_server_with_config(host, port, config).await
}

/// Run the HTTP server with the given configuration.
pub async fn run_server_with_config(
    host: &str,
    port: u16,
    config: GuestsAppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let directory = Arc::new(DirectoryClient::connect_lazy(&config.directory)?);

    let guests = Arc::new(GuestProvisioner::new(
        directory.clone(),
        directory.clone(),
        Arc::new(RandomGenerator),
    ));

    let state = AppState::new(guests, directory);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Guests app listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Address to dial for a service bound on `host`.
fn local_host(host: &str) -> &str {
    if host == "0.0.0.0" {
        "127.0.0.1"
    } else {
        host
    }
}
