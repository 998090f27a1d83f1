//! Guild event handlers for server provisioning.
//!
//! The `guild_create` event fires on startup for every server the bot is
//! already in, and again whenever the bot joins a new one. Setup is
//! idempotent, so both cases run the same path: ensure the SOS NETWORK
//! category and its channels exist, refresh the launch menu, and upsert the
//! server's directory listing.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, Guild};

use crate::service::guild_setup::GuildSetupService;

/// Handles the guild_create event when a guild becomes available or the bot
/// joins a new guild.
pub async fn handle_guild_create(
    db: &DatabaseConnection,
    ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    let guild_id = guild.id.get();

    tracing::debug!(
        "Guild create event: {} ({}) - is_new: {:?}",
        guild.name,
        guild_id,
        is_new
    );

    let bot_user_id = ctx.cache.current_user().id.get();

    let setup = GuildSetupService::new(db, ctx.http.clone());

    if let Err(e) = setup.setup_guild(guild_id, &guild.name, bot_user_id).await {
        tracing::error!("Failed to provision guild {}: {}", guild_id, e);
    }
}
