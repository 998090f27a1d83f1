//! Discord bot integration for the alliance SOS network.
//!
//! The bot is the only outward surface of the application: it provisions
//! member servers as it joins them, relays SOS launches initiated from the
//! network menu button, and tracks voice activity in the reserved channels
//! to drive the inactivity teardown.
//!
//! The bot's HTTP client and cache are shared with the schedulers so the
//! leaderboard republish and the stale-resource sweep reuse the same
//! connection to Discord.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild availability and join events
//! - `GUILD_MESSAGES` - Manage the bot's own menu and broadcast messages
//! - `GUILD_VOICE_STATES` - Track joins and leaves in reserved voice channels
//!
//! None of these are privileged intents.

pub mod handler;
pub mod start;
