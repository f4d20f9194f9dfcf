//! Directory Service Library
//!
//! Account directory and per-user config store, served over gRPC.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::DirectoryServiceConfig;
use crate::grpc::DirectoryGrpcService;
use crate::infra::Database;
use crate::repository::{PreferenceStore, UserStore};
use crate::service::DirectoryManager;

/// Run the directory service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = DirectoryServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = DirectoryServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

async fn run_server_with_config(
    host: &str,
    port: u16,
    config: DirectoryServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    db.ping().await?;
    let db_conn = db.get_connection();

    let users = Arc::new(UserStore::new(db_conn.clone()));
    let preferences = Arc::new(PreferenceStore::new(db_conn));
    let directory = Arc::new(DirectoryManager::new(users, preferences));

    let grpc_service = DirectoryGrpcService::new(directory);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(service = %config.service.service_name, "Directory service listening on {}", addr);

    Server::builder()
        .add_service(proto::UserDirectoryServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
