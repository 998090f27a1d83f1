use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Guild, Interaction, Ready, VoiceState};
use serenity::async_trait;

use crate::sos::registry::SosRegistry;

pub mod guild;
pub mod interaction;
pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub registry: Arc<SosRegistry>,
}

impl Handler {
    pub fn new(db: DatabaseConnection, registry: Arc<SosRegistry>) -> Self {
        Self { db, registry }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.db, &self.registry, ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.db, ctx, guild, is_new).await;
    }

    /// Called when a member's voice connection changes
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(&self.registry, ctx, old, new).await;
    }

    /// Called for component and command interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.db, &self.registry, ctx, interaction).await;
    }
}
