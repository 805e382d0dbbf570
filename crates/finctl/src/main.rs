//! finctl - Personal finance CLI
//!
//! Accounts, credit cards and transactions over the finance REST API,
//! with a persisted login session.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;
mod cli;
mod commands;
mod config;
mod error;

use app::App;
use cli::{Cli, Commands};
use error::FinctlError;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        if !already_reported(&e) {
            eprintln!("{} {:#}", "✗".red(), e);
        }
        std::process::exit(exit_code(&e));
    }
}

async fn run() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("finctl=info".parse()?))
        .init();

    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("finctl {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config = config::Config::load()?;
    let app = App::start(config).await?;

    // Execute command
    match cli.command {
        Commands::Auth(cmd) => commands::auth::execute(cmd.action, &app).await,
        Commands::Account(cmd) => commands::account::execute(cmd.action, &app).await,
        Commands::Card(cmd) => commands::card::execute(cmd.action, &app).await,
        Commands::Tx(cmd) => commands::transaction::execute(cmd.action, &app).await,
        Commands::Dashboard { json } => commands::dashboard::execute(json, &app).await,
        Commands::Version => Ok(()),
    }
}

/// Failed API calls other than 401 were already shown by the notifier.
fn already_reported(e: &anyhow::Error) -> bool {
    match e.downcast_ref::<finctl_core::Error>() {
        Some(finctl_core::Error::Api(api)) => api.category().notifies(),
        _ => false,
    }
}

fn exit_code(e: &anyhow::Error) -> i32 {
    if let Some(err) = e.downcast_ref::<FinctlError>() {
        return err.exit_code();
    }
    match e.downcast_ref::<finctl_core::Error>() {
        Some(core) if core.status() == Some(401) => 3,
        _ => 1,
    }
}
