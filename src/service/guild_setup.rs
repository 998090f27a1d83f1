use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, ChannelId, ChannelType, Colour, CreateButton, CreateChannel, CreateEmbed,
    CreateInvite, CreateMessage, GetMessages, GuildChannel, GuildId, PermissionOverwrite,
    PermissionOverwriteType, Permissions, RoleId, UserId,
};
use serenity::http::Http;

use crate::data::server_listing::{ServerListingRepository, UpsertListing};
use crate::error::AppError;

/// Category grouping the bot's channels in each member server.
pub const CATEGORY_NAME: &str = "SOS NETWORK";

/// Broadcast destination channel; receives SOS copies and the launch menu.
pub const NETWORK_CHANNEL_NAME: &str = "sos-network";

/// Receives the periodic leaderboard republish.
pub const LEADERBOARD_CHANNEL_NAME: &str = "leaderboard";

/// Component id of the launch button; the interaction handler dispatches on it.
pub const LAUNCH_SOS_BUTTON_ID: &str = "launch_sos_button";

const MENU_TITLE: &str = "Welcome to the Alliance Network!";

/// Provisions a member server and registers it in the directory.
///
/// Idempotent per channel: existing channels are matched by name and kind,
/// so re-running setup after a bot restart or a partial failure only creates
/// what is missing. The launch menu is re-posted on every run so the button
/// stays near the bottom of the channel.
pub struct GuildSetupService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
}

impl<'a> GuildSetupService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    pub async fn setup_guild(
        &self,
        guild_id: u64,
        guild_name: &str,
        bot_user_id: u64,
    ) -> Result<(), AppError> {
        let guild = GuildId::new(guild_id);
        let channels = guild.channels(&self.http).await?;
        let existing: Vec<&GuildChannel> = channels.values().collect();

        let category_id = self.ensure_category(guild, &existing).await?;
        let network_channel_id = self
            .ensure_text_channel(
                guild,
                &existing,
                NETWORK_CHANNEL_NAME,
                category_id,
                bot_user_id,
            )
            .await?;
        let leaderboard_channel_id = self
            .ensure_text_channel(
                guild,
                &existing,
                LEADERBOARD_CHANNEL_NAME,
                category_id,
                bot_user_id,
            )
            .await?;

        // Permanent invite so other servers can link back to this one
        let invite_link = match ChannelId::new(network_channel_id)
            .create_invite(&self.http, CreateInvite::new().max_age(0).max_uses(0).unique(false))
            .await
        {
            Ok(invite) => Some(invite.url()),
            Err(err) => {
                tracing::warn!("Failed to create invite for guild {}: {}", guild_id, err);
                None
            }
        };

        ServerListingRepository::new(self.db)
            .upsert(UpsertListing {
                guild_id,
                guild_name: guild_name.to_string(),
                category_id: Some(category_id),
                network_channel_id: Some(network_channel_id),
                leaderboard_channel_id: Some(leaderboard_channel_id),
                invite_link,
            })
            .await?;

        if let Err(err) = self.refresh_menu(network_channel_id, bot_user_id).await {
            tracing::warn!("Failed to refresh launch menu in guild {}: {}", guild_id, err);
        }

        tracing::info!("Provisioned guild {} ({})", guild_name, guild_id);

        Ok(())
    }

    async fn ensure_category(
        &self,
        guild: GuildId,
        existing: &[&GuildChannel],
    ) -> Result<u64, AppError> {
        if let Some(category) = existing
            .iter()
            .find(|channel| channel.kind == ChannelType::Category && channel.name == CATEGORY_NAME)
        {
            return Ok(category.id.get());
        }

        let category = guild
            .create_channel(
                &self.http,
                CreateChannel::new(CATEGORY_NAME).kind(ChannelType::Category),
            )
            .await?;

        Ok(category.id.get())
    }

    async fn ensure_text_channel(
        &self,
        guild: GuildId,
        existing: &[&GuildChannel],
        name: &str,
        category_id: u64,
        bot_user_id: u64,
    ) -> Result<u64, AppError> {
        if let Some(channel) = existing
            .iter()
            .find(|channel| channel.kind == ChannelType::Text && channel.name == name)
        {
            return Ok(channel.id.get());
        }

        let channel = guild
            .create_channel(
                &self.http,
                CreateChannel::new(name)
                    .kind(ChannelType::Text)
                    .category(ChannelId::new(category_id))
                    .permissions(channel_overwrites(guild, bot_user_id)),
            )
            .await?;

        Ok(channel.id.get())
    }

    /// Deletes the bot's previous menu posts in the channel and posts a fresh
    /// menu with the launch button.
    async fn refresh_menu(&self, channel_id: u64, bot_user_id: u64) -> Result<(), AppError> {
        let channel = ChannelId::new(channel_id);

        let recent = channel
            .messages(&self.http, GetMessages::new().limit(10))
            .await?;

        for message in recent {
            let is_old_menu = message.author.id.get() == bot_user_id
                && message
                    .embeds
                    .first()
                    .is_some_and(|embed| embed.title.as_deref() == Some(MENU_TITLE));

            if is_old_menu {
                if let Err(err) = channel.delete_message(&self.http, message.id).await {
                    tracing::warn!("Failed to delete stale menu message {}: {}", message.id, err);
                }
            }
        }

        let embed = CreateEmbed::new()
            .title(MENU_TITLE)
            .description(
                "Need a squad? Press the button below to broadcast an SOS \
                 to every server in the alliance. A voice channel is reserved \
                 for you and torn down once it sits empty for a minute.",
            )
            .colour(Colour::RED);

        let button = CreateButton::new(LAUNCH_SOS_BUTTON_ID)
            .label("LAUNCH SOS")
            .style(ButtonStyle::Danger);

        channel
            .send_message(&self.http, CreateMessage::new().embed(embed).button(button))
            .await?;

        Ok(())
    }
}

/// Members can read and connect but only the bot posts.
fn channel_overwrites(guild: GuildId, bot_user_id: u64) -> Vec<PermissionOverwrite> {
    vec![
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL
                | Permissions::READ_MESSAGE_HISTORY
                | Permissions::USE_APPLICATION_COMMANDS,
            deny: Permissions::SEND_MESSAGES | Permissions::ADD_REACTIONS,
            kind: PermissionOverwriteType::Role(RoleId::new(guild.get())),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::EMBED_LINKS
                | Permissions::MANAGE_MESSAGES,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(UserId::new(bot_user_id)),
        },
    ]
}
