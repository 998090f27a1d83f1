//! Chat-platform seam for the SOS subsystem.
//!
//! The SOS lifecycle never talks to Discord directly; everything it needs from
//! the platform goes through the [`ChatGateway`] trait. Production code uses
//! [`DiscordGateway`], a thin wrapper over serenity's HTTP client and cache.
//! Tests substitute an in-memory mock with scriptable failures.
//!
//! Deletion operations treat a 404 from the platform as success: by the time
//! teardown runs, a moderator may have removed the channel or a message by
//! hand, and that outcome is indistinguishable from a completed delete.

pub mod discord;

pub use discord::DiscordGateway;

use serenity::async_trait;

use crate::error::AppError;
use crate::sos::render::SummaryView;

/// Handle to one posted broadcast copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Operations the SOS subsystem needs from the chat platform.
///
/// Every method is a remote call and therefore a suspension point; callers
/// must not assume two calls are atomic with respect to each other.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Verifies the bot account can manage channels, send messages and embed
    /// rich content in the given guild.
    ///
    /// # Returns
    /// - `Ok(())` - All required capabilities present
    /// - `Err(AppError::MissingPermissions)` - One or more capabilities missing
    async fn check_broadcast_permissions(&self, guild_id: u64) -> Result<(), AppError>;

    /// Names of all voice channels currently existing in the guild.
    ///
    /// Re-queried on every call; teardown deletes channels concurrently, so a
    /// cached result would hand out stale suffixes.
    async fn voice_channel_names(&self, guild_id: u64) -> Result<Vec<String>, AppError>;

    /// Creates an open-join voice channel and returns its id.
    async fn create_voice_channel(
        &self,
        guild_id: u64,
        name: &str,
        user_limit: u32,
        parent_id: Option<u64>,
    ) -> Result<u64, AppError>;

    /// Deletes a voice channel. A channel that is already gone is success.
    async fn delete_voice_channel(&self, channel_id: u64) -> Result<(), AppError>;

    /// Creates a time-limited, unlimited-use join link for a voice channel.
    async fn create_invite(&self, channel_id: u64, max_age_secs: u32) -> Result<String, AppError>;

    /// Number of members currently connected to a voice channel.
    async fn voice_member_count(&self, guild_id: u64, channel_id: u64)
        -> Result<usize, AppError>;

    /// Posts a rendered SOS summary to a channel.
    async fn post_summary(
        &self,
        channel_id: u64,
        view: &SummaryView,
    ) -> Result<MessageRef, AppError>;

    /// Replaces the content of a previously posted summary.
    async fn edit_summary(&self, message: MessageRef, view: &SummaryView)
        -> Result<(), AppError>;

    /// Deletes a posted summary. A message that is already gone is success.
    async fn delete_message(&self, message: MessageRef) -> Result<(), AppError>;
}
