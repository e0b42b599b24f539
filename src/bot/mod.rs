use anyhow::{Context as _, Result};
use serenity::all::{
    ApplicationId, Client, Context, EventHandler, GatewayIntents, Interaction, Ready,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::rugcheck::RugcheckClient;
use crate::config::Config;

pub mod commands;
pub mod embed;

/// Gateway event handler. Every interaction runs on its own task, sharing the one client.
#[derive(Clone)]
pub struct BotState {
    pub rugcheck_client: Arc<RugcheckClient>,
}

#[async_trait]
impl EventHandler for BotState {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is online!", ready.user.tag());
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        if command.data.name != commands::COMMAND_NAME {
            warn!("Ignoring unknown command: /{}", command.data.name);
            return;
        }

        // Reply failures end this invocation only
        if let Err(e) = commands::handle_rugcheck(&ctx, &command, &self.rugcheck_client).await {
            error!("Failed to reply to /{}: {:?}", commands::COMMAND_NAME, e);
        }
    }
}

pub async fn start_bot(config: &Config, rugcheck_client: Arc<RugcheckClient>) -> Result<()> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .application_id(ApplicationId::new(config.client_id))
        .event_handler(BotState { rugcheck_client })
        .await
        .context("Failed to create Discord client")?;

    client.start().await.context("Discord client stopped")?;
    Ok(())
}
