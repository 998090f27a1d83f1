//! Orchestration of SOS creation, membership tracking and teardown.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::error::AppError;
use crate::gateway::ChatGateway;
use crate::sos::allocator;
use crate::sos::registry::SosRegistry;
use crate::sos::render::{self, SosAttributes, SosStatus, SummaryView};
use crate::sos::request::{Participant, SosRequest};

/// Delay between the voice channel emptying and the request being reclaimed.
pub const TEARDOWN_DELAY: Duration = Duration::from_secs(60);

/// Member cap of reserved SOS voice channels.
const VOICE_CHANNEL_USER_LIMIT: u32 = 99;

/// Join links expire after one hour; uses are unlimited.
const INVITE_MAX_AGE_SECS: u32 = 3600;

/// Inputs for launching a new SOS.
pub struct CreateSosParams {
    pub initiator_id: u64,
    pub initiator_name: String,
    pub attributes: SosAttributes,
    pub host_guild_id: u64,
    pub host_guild_name: String,
    /// Category to place the reserved voice channel under, when the host
    /// server has one provisioned.
    pub host_category_id: Option<u64>,
}

/// One fan-out target: the network channel of a member server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastDestination {
    pub guild_id: u64,
    pub channel_id: u64,
}

/// Outcome of a successful launch reported back to the initiator.
#[derive(Debug, Clone)]
pub struct CreatedSos {
    pub request_id: u64,
    pub channel_name: String,
    pub delivered: usize,
    pub failed: usize,
}

/// Manages every open request from creation through teardown.
///
/// All remote effects go through the embedded gateway. Constructing one per
/// event is fine; the shared state lives in the registry.
pub struct SosLifecycle<G> {
    gateway: G,
    registry: Arc<SosRegistry>,
    teardown_delay: Duration,
}

impl<G: ChatGateway + 'static> SosLifecycle<G> {
    pub fn new(gateway: G, registry: Arc<SosRegistry>) -> Self {
        Self {
            gateway,
            registry,
            teardown_delay: TEARDOWN_DELAY,
        }
    }

    pub fn registry(&self) -> &Arc<SosRegistry> {
        &self.registry
    }

    /// Launches a new SOS: reserves a voice channel in the host server and
    /// fans the rendered summary out to every destination.
    ///
    /// Destinations are independent: a failure posting to one is logged and
    /// that destination is simply absent from the broadcast set; it neither
    /// aborts the remaining posts nor fails the launch. Only the permission
    /// precondition and the channel reservation itself can fail the launch,
    /// and both fail before any partial state is registered.
    pub async fn create(
        &self,
        params: CreateSosParams,
        destinations: &[BroadcastDestination],
    ) -> Result<CreatedSos, AppError> {
        self.gateway
            .check_broadcast_permissions(params.host_guild_id)
            .await?;

        // Fresh listing on every launch; teardown frees suffixes concurrently
        let existing = self
            .gateway
            .voice_channel_names(params.host_guild_id)
            .await?;
        let channel_name = allocator::next_channel_name(&existing);

        let channel_id = self
            .gateway
            .create_voice_channel(
                params.host_guild_id,
                &channel_name,
                VOICE_CHANNEL_USER_LIMIT,
                params.host_category_id,
            )
            .await?;
        let invite_url = self
            .gateway
            .create_invite(channel_id, INVITE_MAX_AGE_SECS)
            .await?;

        let mut request = SosRequest {
            channel_id,
            channel_name: channel_name.clone(),
            host_guild_id: params.host_guild_id,
            host_guild_name: params.host_guild_name,
            initiator_id: params.initiator_id,
            attributes: params.attributes,
            invite_url,
            participants: vec![Participant {
                id: params.initiator_id,
                display_name: params.initiator_name,
            }],
            status: SosStatus::Open,
            broadcast_copies: HashMap::new(),
            last_activity: Utc::now(),
        };

        let view = render_request(&request);

        let mut failed = 0;
        for destination in destinations {
            match self.gateway.post_summary(destination.channel_id, &view).await {
                Ok(message) => {
                    request.broadcast_copies.insert(destination.guild_id, message);
                }
                Err(err) => {
                    failed += 1;
                    tracing::error!(
                        "Failed to broadcast SOS {} to guild {}: {}",
                        channel_id,
                        destination.guild_id,
                        err
                    );
                }
            }
        }
        let delivered = request.broadcast_copies.len();

        self.registry.insert(request);

        tracing::info!(
            "Launched SOS {} ({}) by {}: {} copies delivered, {} failed",
            channel_id,
            channel_name,
            params.initiator_id,
            delivered,
            failed
        );

        Ok(CreatedSos {
            request_id: channel_id,
            channel_name,
            delivered,
            failed,
        })
    }

    /// Handles a member joining the reserved voice channel.
    ///
    /// Unknown request ids are ignored; after teardown this is the expected
    /// outcome for straggling events.
    pub async fn on_join(&self, request_id: u64, user_id: u64, display_name: &str) {
        let Some(active) = self.registry.get(request_id) else {
            return;
        };

        // A returning member keeps the request alive
        active.cancel_teardown_timer();

        let mut request = active.state.lock().await;
        request.record_join(user_id, display_name);
        self.propagate(&request).await;
    }

    /// Handles a member leaving the reserved voice channel.
    ///
    /// The roster is untouched; it records who responded, not who is
    /// currently connected. When the channel empties, a single teardown
    /// timer is armed.
    pub async fn on_leave(self: &Arc<Self>, request_id: u64) {
        let Some(active) = self.registry.get(request_id) else {
            return;
        };

        let host_guild_id = active.state.lock().await.host_guild_id;

        let count = match self
            .gateway
            .voice_member_count(host_guild_id, request_id)
            .await
        {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(
                    "Could not read occupancy of SOS channel {}: {}",
                    request_id,
                    err
                );
                return;
            }
        };

        if count > 0 {
            return;
        }

        let lifecycle = Arc::clone(self);
        let armed = active.arm_teardown_timer(move || {
            tokio::spawn(async move {
                tokio::time::sleep(lifecycle.teardown_delay).await;
                lifecycle.teardown(request_id).await;
            })
        });

        if armed {
            tracing::debug!(
                "SOS channel {} is empty, teardown scheduled in {:?}",
                request_id,
                self.teardown_delay
            );
        }
    }

    /// Reclaims the voice channel and every broadcast copy of a request.
    ///
    /// Idempotent: an unknown request id is a no-op, and resources that are
    /// already gone do not fail the remaining deletions. The occupancy
    /// re-check covers the race where a join lands between the timer firing
    /// and this call running.
    pub async fn teardown(&self, request_id: u64) {
        let Some(active) = self.registry.get(request_id) else {
            return;
        };

        let request = active.state.lock().await;

        match self
            .gateway
            .voice_member_count(request.host_guild_id, request.channel_id)
            .await
        {
            Ok(0) => {}
            Ok(_) => {
                tracing::debug!("SOS channel {} regained members, skipping teardown", request_id);
                return;
            }
            Err(err) => {
                tracing::warn!(
                    "Could not read occupancy of SOS channel {}, skipping teardown: {}",
                    request_id,
                    err
                );
                return;
            }
        }

        // Concurrent lookups must see the request gone before deletion starts
        if self.registry.remove(request_id).is_none() {
            return;
        }

        for (guild_id, message) in &request.broadcast_copies {
            if let Err(err) = self.gateway.delete_message(*message).await {
                tracing::warn!(
                    "Failed to delete SOS {} copy in guild {}: {}",
                    request_id,
                    guild_id,
                    err
                );
            }
        }

        if let Err(err) = self.gateway.delete_voice_channel(request.channel_id).await {
            tracing::warn!(
                "Failed to delete SOS voice channel {}: {}",
                request.channel_id,
                err
            );
        }

        tracing::info!("Tore down inactive SOS {} ({})", request_id, request.channel_name);
    }

    /// Pushes the current render to every broadcast copy.
    ///
    /// Sequential and best-effort per destination; an observer can
    /// transiently see stale state in one destination and fresh state in
    /// another. Callers hold the request lock, so all copies match the
    /// roster by the time the critical section releases.
    async fn propagate(&self, request: &SosRequest) {
        let view = render_request(request);

        for (guild_id, message) in &request.broadcast_copies {
            if let Err(err) = self.gateway.edit_summary(*message, &view).await {
                tracing::warn!(
                    "Failed to update SOS {} copy in guild {}: {}",
                    request.channel_id,
                    guild_id,
                    err
                );
            }
        }
    }
}

fn render_request(request: &SosRequest) -> SummaryView {
    render::render_summary(
        &request.attributes,
        request.status,
        &request.participants,
        &request.host_guild_name,
        &request.invite_url,
    )
}
