use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod controllers;
mod error;
mod models;
mod reference;
mod response;
mod routes;
mod storage;

use config::Config;
use storage::AnyStore;

/// Shared state, built once at startup and cloned into every request.
#[derive(Clone)]
pub struct App {
    config: Config,
    store: AnyStore,
}

#[derive(Parser)]
#[command(about = "A tiny content-addressed paste service")]
struct Cli {
    /// Path to the config file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve,
    /// Print the paste stored under a reference.
    Show { reference: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // try to load .env, ignoring any errors
    _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    let store = AnyStore::connect(&config.store)
        .await
        .context("failed to set up store")?;

    let app = App { config, store };

    match cli.command {
        Command::Serve => commands::serve::run(app).await,
        Command::Show { reference } => commands::show::run(app, &reference).await,
    }
}
