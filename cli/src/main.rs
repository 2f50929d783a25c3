//! # viewroute CLI
//!
//! Command-line shell for viewroute - navigate the application's lazily
//! loaded views without full reloads.
//!
//! ## Usage
//!
//! - `viewroute` - Start the interactive shell
//! - `viewroute open /tutorial /` - Navigate to each path in order
//! - `viewroute routes` - Show the route table
//!
//! The router is built once at start-up and handed explicitly to whichever
//! command runs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

mod commands;
mod config;
mod output;
mod pages;
mod routes;

use commands::{interactive_command, open_command, routes_command};
use config::CliConfigLoader;

/// viewroute - A client-side route table with lazily loaded views
#[derive(Parser)]
#[command(name = "viewroute")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Navigate an application's lazily loaded views")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL path prefix the application is served under
    #[arg(long, env = "BASE_URL")]
    base: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the route table
    Routes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Navigate to each target in order and print the rendered pages
    Open {
        /// Application paths, e.g. / /tutorial?step=2
        #[arg(required = true)]
        targets: Vec<String>,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(base) = &cli.base {
        loader = loader.with_base_override(base.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    viewroute_core::init_tracing(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let options = build_config_loader(&cli).load().await?;
    let router = routes::create_app_router(options).context("Failed to build route table")?;

    match cli.command {
        Some(Commands::Routes { json }) => routes_command(router, json).await,
        Some(Commands::Open { targets }) => open_command(router, targets).await,
        None => interactive_command(router).await,
    }
}
