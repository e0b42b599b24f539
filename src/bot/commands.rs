use anyhow::{Context as _, Result};
use serenity::all::{
    CommandDataOptionValue, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse, GuildId,
};
use serenity::http::Http;
use tracing::{error, info, warn};

use crate::api::rugcheck::RugcheckClient;
use crate::bot::embed::{format_report, DisplayPayload};
use crate::error::RugcheckError;
use crate::models::{NormalizedReport, TokenIdentifier};

pub const COMMAND_NAME: &str = "rugcheck";
pub const TOKEN_OPTION: &str = "token-ca";
pub const ERROR_REPLY: &str = "Sorry, an error occurred, please try again.";

// --- Command Definition & Registration ---

pub fn rugcheck_command() -> CreateCommand {
    CreateCommand::new(COMMAND_NAME)
        .description("Parses Rugcheck API to check if a token is a rug")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, TOKEN_OPTION, "The SOLANA token CA")
                .required(true),
        )
}

/// Replaces the guild's whole command set with `/rugcheck`.
/// `http` must already carry the application id.
pub async fn register_commands(http: &Http, guild_id: GuildId) -> Result<usize> {
    info!("Started refreshing application (/) commands.");

    let commands = guild_id
        .set_commands(http, vec![rugcheck_command()])
        .await
        .with_context(|| format!("Failed to upload commands for guild {}", guild_id))?;

    info!("Successfully reloaded {} application (/) commands.", commands.len());
    Ok(commands.len())
}

// --- Reply Resolution ---

/// Final state of one invocation; becomes the single edit of the acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Report(DisplayPayload),
    Error(&'static str),
}

impl Reply {
    pub fn into_edit(self) -> EditInteractionResponse {
        match self {
            // Clear the provisional "Checking token..." text
            Reply::Report(payload) => EditInteractionResponse::new()
                .content("")
                .embed(payload.into_embed()),
            Reply::Error(message) => EditInteractionResponse::new().content(message),
        }
    }
}

pub fn acknowledgement(token_ca: &str) -> String {
    format!("Checking token {} for rug...", token_ca)
}

pub fn resolve_reply(
    result: Result<NormalizedReport, RugcheckError>,
    token: &TokenIdentifier,
) -> Reply {
    match result {
        Ok(report) => Reply::Report(format_report(&report, token)),
        Err(e) => {
            error!("Rugcheck failed for {} [{}]: {:?}", token, e.kind(), e);
            Reply::Error(ERROR_REPLY)
        }
    }
}

/// Looks up and resolves a report for a raw `token-ca` value. Blank input never reaches the API.
pub async fn check_token(client: &RugcheckClient, token_ca: &str) -> Reply {
    match TokenIdentifier::parse(token_ca) {
        Ok(token) => resolve_reply(client.fetch_report(&token).await, &token),
        Err(e) => {
            error!("Rejected /{} input [{}]: {}", COMMAND_NAME, e.kind(), e);
            Reply::Error(ERROR_REPLY)
        }
    }
}

// --- Interaction Handler ---

fn token_option(command: &CommandInteraction) -> Option<&str> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == TOKEN_OPTION)
        .and_then(|option| match &option.value {
            CommandDataOptionValue::String(value) => Some(value.as_str()),
            _ => None,
        })
}

pub async fn handle_rugcheck(
    ctx: &Context,
    command: &CommandInteraction,
    client: &RugcheckClient,
) -> serenity::Result<()> {
    let token_ca = token_option(command).unwrap_or_default();
    info!(
        "Command received: /{} {}={} from user: {}",
        COMMAND_NAME, TOKEN_OPTION, token_ca, command.user.id
    );

    let ack = CreateInteractionResponseMessage::new().content(acknowledgement(token_ca));
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(ack))
        .await?;

    let reply = check_token(client, token_ca).await;
    if let Reply::Error(_) = reply {
        warn!("Replying with error message for {}", token_ca);
    }

    command.edit_response(&ctx.http, reply.into_edit()).await?;
    Ok(())
}
