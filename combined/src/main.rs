//! Combined binary for development - runs the directory service and the
//! guests app in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "guests-dev")]
#[command(about = "Combined guests binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "3000")]
        guests_port: u16,
        #[arg(long, default_value = "50052")]
        directory_port: u16,
    },
    /// Run directory database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            guests_port,
            directory_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Guests app:        http://{}:{}", host, guests_port);
            info!("  Directory service: http://{}:{}", host, directory_port);

            // Directory first, it owns the database
            let directory_host = host.clone();
            let directory_handle = tokio::spawn(async move {
                if let Err(e) =
                    directory_service_lib::run_embedded(&directory_host, directory_port).await
                {
                    error!("Directory service failed: {}", e);
                }
            });

            tokio::time::sleep(std::time::Duration::from_millis(500)).await;

            let guests_host = host.clone();
            let guests_handle = tokio::spawn(async move {
                if let Err(e) =
                    guests_app_lib::run_embedded(&guests_host, guests_port, directory_port).await
                {
                    error!("Guests app failed: {}", e);
                }
            });

            tokio::select! {
                _ = directory_handle => {
                    error!("Directory service exited unexpectedly");
                }
                _ = guests_handle => {
                    error!("Guests app exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateAction::Up => directory_service_lib::MigrateAction::Up,
                MigrateAction::Down => directory_service_lib::MigrateAction::Down,
                MigrateAction::Status => directory_service_lib::MigrateAction::Status,
                MigrateAction::Fresh => directory_service_lib::MigrateAction::Fresh,
            };

            directory_service_lib::run_migrations(migrate_action).await?;
        }
    }

    Ok(())
}
