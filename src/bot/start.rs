use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::bot::handler::Handler;
use crate::config::Config;
use crate::error::AppError;
use crate::sos::registry::SosRegistry;

/// Builds the Discord client with the event handler wired up.
///
/// Returned unstarted so the caller can clone the shared HTTP client and
/// cache for the schedulers before connecting.
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    registry: Arc<SosRegistry>,
) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_VOICE_STATES;

    let handler = Handler::new(db, registry);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Starts the Discord bot in a blocking manner.
///
/// Blocks until the gateway connection shuts down, so call it last or from
/// a dedicated task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
