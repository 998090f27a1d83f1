//! Voice state handlers driving the SOS membership ledger and teardown.
//!
//! Discord reports voice activity as state transitions: the previous state
//! (if cached) and the new one. A move between two channels is one event
//! that counts as a leave from the old channel and a join to the new one.
//! Events for channels without a live request fall through silently; most
//! voice traffic in a server has nothing to do with an SOS.

use std::sync::Arc;

use serenity::all::{Context, VoiceState};

use crate::gateway::DiscordGateway;
use crate::sos::lifecycle::SosLifecycle;
use crate::sos::registry::SosRegistry;

/// Handles a member's voice connection changing.
pub async fn handle_voice_state_update(
    registry: &Arc<SosRegistry>,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let old_channel = old.as_ref().and_then(|state| state.channel_id);
    let new_channel = new.channel_id;

    if old_channel == new_channel {
        // Mute, deafen or stream toggles; no movement
        return;
    }

    let lifecycle = Arc::new(SosLifecycle::new(
        DiscordGateway::new(&ctx),
        registry.clone(),
    ));

    if let Some(channel_id) = old_channel {
        lifecycle.on_leave(channel_id.get()).await;
    }

    if let Some(channel_id) = new_channel {
        let user_id = new.user_id.get();
        let display_name = match &new.member {
            Some(member) => member.display_name().to_string(),
            None => match new.user_id.to_user(&ctx.http).await {
                Ok(user) => user.name,
                Err(e) => {
                    tracing::warn!("Failed to resolve user {} for roster: {}", user_id, e);
                    return;
                }
            },
        };

        lifecycle
            .on_join(channel_id.get(), user_id, &display_name)
            .await;
    }
}
