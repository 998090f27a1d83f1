//! Business logic orchestration between event handlers and the data layer.

pub mod guild_setup;
pub mod leaderboard;
pub mod sos;
