use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, ChannelType, GetMessages, GuildId};
use serenity::cache::Cache;
use serenity::http::Http;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::data::ServerListingRepository;
use crate::error::AppError;
use crate::sos::allocator::CHANNEL_PREFIX;
use crate::sos::registry::SosRegistry;
use crate::sos::render::SOS_TITLE;

/// Messages inspected per network channel during a sweep.
const SWEEP_MESSAGE_LIMIT: u8 = 50;

/// Starts the hourly sweep for orphaned SOS resources.
///
/// Open requests live only in memory, so a restart strands their voice
/// channels and broadcast messages. The sweep deletes empty SOS voice
/// channels and stale SOS embeds in every listed server, skipping anything
/// tracked by a live request.
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    cache: Arc<Cache>,
    registry: Arc<SosRegistry>,
    bot_user_id: u64,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_http = discord_http.clone();
    let job_cache = cache.clone();
    let job_registry = registry.clone();

    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let http = job_http.clone();
        let cache = job_cache.clone();
        let registry = job_registry.clone();

        Box::pin(async move {
            if let Err(e) = sweep(&db, &http, &cache, &registry, bot_user_id).await {
                tracing::error!("Error sweeping stale SOS resources: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Cleanup scheduler started");

    Ok(())
}

/// One pass over every listed server.
///
/// Per-guild failures are logged and skipped; one unreachable server must
/// not leave the rest of the alliance dirty.
pub async fn sweep(
    db: &DatabaseConnection,
    http: &Arc<Http>,
    cache: &Arc<Cache>,
    registry: &Arc<SosRegistry>,
    bot_user_id: u64,
) -> Result<(), AppError> {
    let (live_channels, live_messages) = live_resources(registry).await;

    let listings = ServerListingRepository::new(db).get_all().await?;

    for listing in &listings {
        let Ok(guild_id) = listing.guild_id.parse::<u64>() else {
            continue;
        };

        if let Err(e) = sweep_voice_channels(http, cache, guild_id, &live_channels).await {
            tracing::warn!("Failed to sweep voice channels in guild {}: {}", guild_id, e);
        }

        let network_channel_id = listing
            .network_channel_id
            .as_ref()
            .and_then(|id| id.parse::<u64>().ok());

        if let Some(channel_id) = network_channel_id {
            if let Err(e) =
                sweep_messages(http, channel_id, bot_user_id, &live_messages).await
            {
                tracing::warn!(
                    "Failed to sweep SOS messages in channel {}: {}",
                    channel_id,
                    e
                );
            }
        }
    }

    Ok(())
}

/// Channel and message ids owned by requests currently in the registry.
async fn live_resources(registry: &SosRegistry) -> (HashSet<u64>, HashSet<u64>) {
    let mut channels = HashSet::new();
    let mut messages = HashSet::new();

    for active in registry.snapshot() {
        let request = active.state.lock().await;
        channels.insert(request.channel_id);
        messages.extend(
            request
                .broadcast_copies
                .values()
                .map(|message| message.message_id),
        );
    }

    (channels, messages)
}

/// Deletes empty SOS voice channels nothing in the registry owns.
async fn sweep_voice_channels(
    http: &Arc<Http>,
    cache: &Arc<Cache>,
    guild_id: u64,
    live_channels: &HashSet<u64>,
) -> Result<(), AppError> {
    let channels = GuildId::new(guild_id).channels(http).await?;

    let candidates: Vec<u64> = channels
        .values()
        .filter(|channel| {
            channel.kind == ChannelType::Voice
                && channel.name.starts_with(CHANNEL_PREFIX)
                && !live_channels.contains(&channel.id.get())
        })
        .map(|channel| channel.id.get())
        .collect();

    for channel_id in candidates {
        let occupancy = {
            cache.guild(GuildId::new(guild_id)).map(|guild| {
                guild
                    .voice_states
                    .values()
                    .filter(|state| state.channel_id == Some(ChannelId::new(channel_id)))
                    .count()
            })
        };

        if !safe_to_reclaim(occupancy) {
            continue;
        }

        match ChannelId::new(channel_id).delete(http).await {
            Ok(_) => tracing::info!("Reclaimed orphaned SOS channel {}", channel_id),
            Err(e) => tracing::warn!("Failed to delete orphaned channel {}: {}", channel_id, e),
        }
    }

    Ok(())
}

/// Unknown occupancy (guild absent from the cache) reads as occupied; a
/// leaked channel is recoverable on a later pass, a deleted occupied one is
/// not.
fn safe_to_reclaim(occupancy: Option<usize>) -> bool {
    occupancy == Some(0)
}

/// Deletes the bot's stale SOS embeds in one network channel.
async fn sweep_messages(
    http: &Arc<Http>,
    channel_id: u64,
    bot_user_id: u64,
    live_messages: &HashSet<u64>,
) -> Result<(), AppError> {
    let channel = ChannelId::new(channel_id);

    let recent = channel
        .messages(http, GetMessages::new().limit(SWEEP_MESSAGE_LIMIT))
        .await?;

    for message in recent {
        let is_stale_sos = message.author.id.get() == bot_user_id
            && !live_messages.contains(&message.id.get())
            && message
                .embeds
                .first()
                .is_some_and(|embed| embed.title.as_deref() == Some(SOS_TITLE));

        if is_stale_sos {
            if let Err(e) = channel.delete_message(http, message.id).await {
                tracing::warn!("Failed to delete stale SOS message {}: {}", message.id, e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reclaims_only_channels_known_to_be_empty() {
        assert!(safe_to_reclaim(Some(0)));
        assert!(!safe_to_reclaim(Some(2)));
    }

    #[test]
    fn unknown_occupancy_is_treated_as_occupied() {
        assert!(!safe_to_reclaim(None));
    }
}
