mod cache;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cache::FileMarkerStore;
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::notify;
use crate::config::{AppConfig, SettingsArgs};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::discord::DiscordClient;
use crate::infra::github::GitHubClient;

#[derive(Parser)]
#[command(
    name = "plumbot",
    author,
    version,
    about = "Announce new feat commits from GitHub in a Discord channel"
)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll every five minutes and announce new feat commits (default).
    Run,
    /// Run a single poll and exit.
    Once,
    /// Inspect the resolved settings.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Config(args) => {
            config_cmd::run(args.command, &cli.settings);
            Ok(())
        }
        Commands::Run => {
            let context = connect(cli.settings).await?;
            notify::run(&context).await
        }
        Commands::Once => {
            let context = connect(cli.settings).await?;
            let outcome = notify::once(&context).await?;
            println!("{outcome}");
            Ok(())
        }
    }
}

/// Resolves configuration and verifies the chat credential before any
/// polling starts.
async fn connect(settings: SettingsArgs) -> AppResult<AppContext> {
    let config = AppConfig::from_settings(settings)?;

    let chat = DiscordClient::new(
        config.discord_api_url.clone(),
        config.discord_token.clone(),
        config.channel_id.clone(),
    );
    let bot = chat.connect().await?;
    info!(%bot, channel = %config.channel_id, "connected to Discord");

    let source_host = GitHubClient::new(
        config.github_api_url.clone(),
        config.repository.clone(),
        Some(config.github_token.clone()),
    );
    let markers = FileMarkerStore::new(config.cache_path.clone());
    info!(path = %markers.path().display(), "using marker file");

    Ok(AppContext::new(
        config,
        Arc::new(source_host),
        Arc::new(chat),
        Arc::new(markers),
    ))
}
