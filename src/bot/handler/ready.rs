//! Ready event handler for bot initialization.
//!
//! Fired once per gateway connection after authentication. Besides logging,
//! this is where the startup sweep runs: open requests are not persisted, so
//! a restart strands whatever channels and broadcast messages were live, and
//! they need reclaiming before the hourly sweep would get to them.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{ActivityData, Context, Ready};

use crate::scheduler::cleanup;
use crate::sos::registry::SosRegistry;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `db` - Database connection for the startup sweep
/// - `registry` - Live request registry; freshly connected, normally empty
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(
    db: &DatabaseConnection,
    registry: &Arc<SosRegistry>,
    ctx: Context,
    ready: Ready,
) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("for SOS signals")));

    let bot_user_id = ready.user.id.get();
    let db = db.clone();
    let registry = registry.clone();
    let http = ctx.http.clone();
    let cache = ctx.cache.clone();

    // Off the event loop so a slow sweep never delays other events
    tokio::spawn(async move {
        if let Err(e) = cleanup::sweep(&db, &http, &cache, &registry, bot_user_id).await {
            tracing::error!("Startup sweep failed: {}", e);
        }
    });
}
