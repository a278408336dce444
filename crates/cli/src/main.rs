//! Fairway CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! fairway-cli migrate
//!
//! # Provision a password login for a user
//! fairway-cli user set-password -e golfer@example.com -p 'a-long-password'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user set-password` - Provision a password login for a user

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fairway-cli")]
#[command(author, version, about = "Fairway CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Set a password for a user, creating the account if needed
    SetPassword {
        /// User email address
        #[arg(short, long)]
        email: String,

        /// Password to set
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::SetPassword { email, password } => {
                commands::user::set_password(&email, &password).await?;
            }
        },
    }
    Ok(())
}
