use std::sync::Arc;

use serenity::all::{
    ChannelId, ChannelType, Colour, Context, CreateChannel, CreateEmbed, CreateInvite,
    CreateMessage, EditMessage, GuildId, MessageId,
};
use serenity::async_trait;
use serenity::cache::Cache;
use serenity::http::{Http, HttpError, StatusCode};

use crate::error::AppError;
use crate::gateway::{ChatGateway, MessageRef};
use crate::sos::render::SummaryView;

/// Permissions the bot needs to launch and broadcast an SOS.
const REQUIRED_PERMISSIONS: [(&str, serenity::all::Permissions); 3] = [
    ("MANAGE_CHANNELS", serenity::all::Permissions::MANAGE_CHANNELS),
    ("SEND_MESSAGES", serenity::all::Permissions::SEND_MESSAGES),
    ("EMBED_LINKS", serenity::all::Permissions::EMBED_LINKS),
];

/// Serenity-backed implementation of [`ChatGateway`].
///
/// Holds clones of the client's shared HTTP client and cache, so constructing
/// one per event is cheap.
pub struct DiscordGateway {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl DiscordGateway {
    pub fn new(ctx: &Context) -> Self {
        Self {
            http: ctx.http.clone(),
            cache: ctx.cache.clone(),
        }
    }

    pub fn from_parts(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }
}

/// True when the error is Discord telling us the target no longer exists.
fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(resp))
            if resp.status_code == StatusCode::NOT_FOUND
    )
}

/// Converts a rendered summary into a Discord embed.
fn summary_embed(view: &SummaryView) -> CreateEmbed {
    CreateEmbed::new()
        .title(view.title.clone())
        .description(view.description.clone())
        .colour(Colour::RED)
        .fields(
            view.fields
                .iter()
                .map(|field| (field.name.clone(), field.value.clone(), false)),
        )
}

#[async_trait]
impl ChatGateway for DiscordGateway {
    async fn check_broadcast_permissions(&self, guild_id: u64) -> Result<(), AppError> {
        let bot_user_id = self.cache.current_user().id;

        let member = GuildId::new(guild_id).member(&self.http, bot_user_id).await?;

        let permissions = {
            let guild = self.cache.guild(GuildId::new(guild_id)).ok_or_else(|| {
                AppError::NotFound(format!("Guild {} not found in cache", guild_id))
            })?;
            guild.member_permissions(&member)
        };

        let missing: Vec<&str> = REQUIRED_PERMISSIONS
            .iter()
            .filter(|(_, flag)| !permissions.contains(*flag))
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingPermissions(missing.join(", ")))
        }
    }

    async fn voice_channel_names(&self, guild_id: u64) -> Result<Vec<String>, AppError> {
        let channels = GuildId::new(guild_id).channels(&self.http).await?;

        Ok(channels
            .values()
            .filter(|channel| channel.kind == ChannelType::Voice)
            .map(|channel| channel.name.clone())
            .collect())
    }

    async fn create_voice_channel(
        &self,
        guild_id: u64,
        name: &str,
        user_limit: u32,
        parent_id: Option<u64>,
    ) -> Result<u64, AppError> {
        let mut builder = CreateChannel::new(name)
            .kind(ChannelType::Voice)
            .user_limit(user_limit);

        if let Some(parent_id) = parent_id {
            builder = builder.category(ChannelId::new(parent_id));
        }

        let channel = GuildId::new(guild_id)
            .create_channel(&self.http, builder)
            .await?;

        Ok(channel.id.get())
    }

    async fn delete_voice_channel(&self, channel_id: u64) -> Result<(), AppError> {
        match ChannelId::new(channel_id).delete(&self.http).await {
            Ok(_) => Ok(()),
            Err(err) if is_not_found(&err) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_invite(&self, channel_id: u64, max_age_secs: u32) -> Result<String, AppError> {
        let invite = ChannelId::new(channel_id)
            .create_invite(
                &self.http,
                CreateInvite::new().max_age(max_age_secs).max_uses(0),
            )
            .await?;

        Ok(invite.url())
    }

    async fn voice_member_count(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<usize, AppError> {
        let guild = self
            .cache
            .guild(GuildId::new(guild_id))
            .ok_or_else(|| AppError::NotFound(format!("Guild {} not found in cache", guild_id)))?;

        Ok(guild
            .voice_states
            .values()
            .filter(|state| state.channel_id == Some(ChannelId::new(channel_id)))
            .count())
    }

    async fn post_summary(
        &self,
        channel_id: u64,
        view: &SummaryView,
    ) -> Result<MessageRef, AppError> {
        let message = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(summary_embed(view)))
            .await?;

        Ok(MessageRef {
            channel_id,
            message_id: message.id.get(),
        })
    }

    async fn edit_summary(
        &self,
        message: MessageRef,
        view: &SummaryView,
    ) -> Result<(), AppError> {
        ChannelId::new(message.channel_id)
            .edit_message(
                &self.http,
                MessageId::new(message.message_id),
                EditMessage::new().embed(summary_embed(view)),
            )
            .await?;

        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), AppError> {
        match ChannelId::new(message.channel_id)
            .delete_message(&self.http, MessageId::new(message.message_id))
            .await
        {
            Ok(()) => Ok(()),
            Err(err) if is_not_found(&err) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
