//! Background cron jobs.
//!
//! Two schedulers run alongside the gateway client: the leaderboard
//! republish every eight hours and the stale-resource sweep every hour.
//! The sweep also runs once at startup to reclaim channels and messages
//! orphaned by a restart, since open requests live only in memory.

pub mod cleanup;
pub mod leaderboard;
