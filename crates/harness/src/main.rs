//! Guests Harness - command line driver for guest scenarios.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guests_harness::{
    get_set_password_url, GuestsContext, HarnessConfig, HarnessResult, RecordedResponse,
    ResetLinkExtractor,
};

#[derive(Parser)]
#[command(name = "guests-harness")]
#[command(about = "End-to-end driver for the guests app")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the username the frontend derives from an email
    Username { email: String },
    /// Print the set-password URL found in an email body
    Extract {
        /// File holding the body; stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Platform name in the activation template
        #[arg(long, env = "PLATFORM_NAME", default_value = guests_harness::DEFAULT_PLATFORM_NAME)]
        platform: String,
    },
    /// Create a guest as the given user
    CreateGuest {
        #[arg(long = "as", default_value = "admin")]
        user: String,
        display_name: String,
        email: String,
    },
    /// Set a guest's password from the newest activation email
    SetPassword { display_name: String, email: String },
    /// Delete a guest through the provisioning API
    DeleteGuest { display_name: String, email: String },
    /// Create a guest, activate it and clean up
    Scenario {
        #[arg(long = "as", default_value = "admin")]
        user: String,
        display_name: String,
        email: String,
    },
}

fn print_response(step: &str, response: &RecordedResponse) {
    println!("{}: {}", step, response.status);
    if !response.body.is_empty() {
        println!("{}", response.body);
    }
}

#[tokio::main]
async fn main() -> HarnessResult<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = HarnessConfig::from_env();

    match cli.command {
        Commands::Username { email } => {
            println!("{}", GuestsContext::prepare_username_as_frontend(&email));
        }
        Commands::Extract { file, platform } => {
            let body = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut body = String::new();
                    std::io::stdin().read_to_string(&mut body)?;
                    body
                }
            };
            let reset_url = ResetLinkExtractor::new(&platform).extract_reset_password_url(&body)?;
            println!("{}", get_set_password_url(&reset_url)?);
        }
        Commands::CreateGuest {
            user,
            display_name,
            email,
        } => {
            let mut context = GuestsContext::new(config);
            let response = context
                .user_creates_guest_user(&user, &display_name, &email)
                .await?;
            print_response("create", response);
        }
        Commands::SetPassword {
            display_name,
            email,
        } => {
            let mut context = GuestsContext::new(config);
            context.remember_guest(&display_name, &email);
            let response = context.guest_user_sets_its_password(&display_name).await?;
            print_response("set-password", response);
        }
        Commands::DeleteGuest {
            display_name,
            email,
        } => {
            let mut context = GuestsContext::new(config);
            context.remember_guest(&display_name, &email);
            let response = context.delete_guest_user(&display_name).await?;
            print_response("delete", response);
        }
        Commands::Scenario {
            user,
            display_name,
            email,
        } => {
            let mut context = GuestsContext::new(config);
            let response = context
                .user_creates_guest_user(&user, &display_name, &email)
                .await?;
            print_response("create", response);

            let outcome = context
                .guest_user_sets_its_password(&display_name)
                .await
                .cloned();
            if let Ok(response) = &outcome {
                print_response("set-password", response);
            }

            // Clean up even when activation failed
            context.cleanup_guests().await?;
            outcome?;
        }
    }

    Ok(())
}
