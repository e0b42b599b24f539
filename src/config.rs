use anyhow::{anyhow, Context, Result};
use ::config::{Environment, File, FileFormat};
use std::path::Path;

use crate::api::rugcheck::RUGCHECK_BASE_URL;

#[derive(Clone, Debug)]
pub struct Config {
    pub discord_token: String,
    pub client_id: u64, // Discord application id
    pub guild_id: u64,  // Server the command is registered to
    pub rugcheck_api_url: String,
}

/// Raw values gathered from `config.json` and the environment, before validation.
///
/// `config.json` uses `token` / `CLIENT_ID` / `GUILD_ID`; the environment uses
/// `DISCORD_TOKEN` / `DISCORD_CLIENT_ID` / `DISCORD_GUILD_ID` and `RUGCHECK_API_URL`.
#[derive(Debug, Default)]
pub struct Settings {
    pub token: Option<String>,
    pub client_id: Option<String>,
    pub guild_id: Option<String>,
    pub api_url: Option<String>,
}

impl Settings {
    /// Env keys arrive lowercased (`client_id`) while file keys keep their case
    /// (`CLIENT_ID`), so the env spelling is looked up first.
    fn from_layered(layered: &::config::Config) -> Self {
        fn lookup(layered: &::config::Config, keys: &[&str]) -> Option<String> {
            keys.iter().find_map(|key| layered.get_string(key).ok())
        }

        Self {
            token: lookup(layered, &["token"]),
            client_id: lookup(layered, &["client_id", "CLIENT_ID"]),
            guild_id: lookup(layered, &["guild_id", "GUILD_ID"]),
            api_url: lookup(layered, &["api_url"]),
        }
    }
}

impl Config {
    /// Loads `path` (optional, JSON) with environment variables layered on top.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_from(
            path,
            Environment::with_prefix("DISCORD"),
            Environment::with_prefix("RUGCHECK"),
        )
    }

    fn load_from(path: &Path, discord_env: Environment, rugcheck_env: Environment) -> Result<Self> {
        let layered = ::config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(discord_env)
            .add_source(rugcheck_env)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        Self::from_settings(Settings::from_layered(&layered))
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        let discord_token = settings
            .token
            .filter(|t| !t.trim().is_empty())
            .context("Bot token not set (DISCORD_TOKEN or `token` in config.json)")?;

        Ok(Self {
            discord_token,
            client_id: parse_id(settings.client_id, "DISCORD_CLIENT_ID")?,
            guild_id: parse_id(settings.guild_id, "DISCORD_GUILD_ID")?,
            rugcheck_api_url: settings
                .api_url
                .unwrap_or_else(|| RUGCHECK_BASE_URL.to_string()),
        })
    }
}

fn parse_id(value: Option<String>, name: &str) -> Result<u64> {
    let raw = value.with_context(|| format!("{} not set", name))?;
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(anyhow!("{} must be non-zero", name)),
        Ok(id) => Ok(id),
        Err(_) => Err(anyhow!("Failed to parse {} as integer: {:?}", name, raw)),
    }
}
