use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serenity::all::{ApplicationId, GuildId};
use serenity::http::Http;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod bot;
mod config;
mod error;
mod models;

use crate::api::rugcheck::RugcheckClient;
use crate::api::throttle::Throttle;
use crate::config::Config;

/// Discord bot that summarizes Rugcheck risk reports
#[derive(Parser, Debug)]
#[command(name = "rugcheck-bot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON config file with `token`, `CLIENT_ID` and `GUILD_ID`
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Connect to Discord and answer /rugcheck (default)
    Serve,
    /// Replace the guild's slash commands with /rugcheck, then exit
    Register,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    info!("Configuration loaded successfully");

    match cli.mode.unwrap_or(Mode::Serve) {
        Mode::Serve => serve(config).await,
        Mode::Register => {
            register(&config).await;
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    let throttle = Throttle::new(Throttle::DEFAULT_PERIOD)?;
    let rugcheck_client = Arc::new(
        RugcheckClient::new(&config.rugcheck_api_url, throttle)
            .context("Failed to create Rugcheck client")?,
    );
    info!("Rugcheck client initialized for {}", config.rugcheck_api_url);

    info!("Starting Rugcheck bot...");
    bot::start_bot(&config, rugcheck_client).await
}

// Registration failures are logged, never fatal.
async fn register(config: &Config) {
    let http = Http::new(&config.discord_token);
    http.set_application_id(ApplicationId::new(config.client_id));

    if let Err(e) = bot::commands::register_commands(&http, GuildId::new(config.guild_id)).await {
        error!("Command registration failed: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_serve() {
        let cli = Cli::parse_from(["rugcheck-bot"]);
        assert_eq!(cli.mode, None);
        assert_eq!(cli.config, PathBuf::from("config.json"));
    }

    #[test]
    fn test_cli_register_mode() {
        let cli = Cli::parse_from(["rugcheck-bot", "--config", "prod.json", "register"]);
        assert_eq!(cli.mode, Some(Mode::Register));
        assert_eq!(cli.config, PathBuf::from("prod.json"));
    }
}
