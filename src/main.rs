use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use sosnet::{bot, config::Config, scheduler, sos::registry::SosRegistry, startup};

#[tokio::main]
async fn main() -> Result<(), sosnet::error::AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;

    let registry = Arc::new(SosRegistry::new());

    tracing::info!("Starting SOS network bot");

    let client = bot::start::init_bot(&config, db.clone(), registry.clone()).await?;

    // The schedulers share the client's connection to Discord
    let discord_http = client.http.clone();
    let discord_cache = client.cache.clone();

    let bot_user_id = discord_http.get_current_user().await?.id.get();

    scheduler::leaderboard::start_scheduler(db.clone(), discord_http.clone(), bot_user_id).await?;
    scheduler::cleanup::start_scheduler(
        db,
        discord_http,
        discord_cache,
        registry,
        bot_user_id,
    )
    .await?;

    // Blocks until the gateway connection shuts down
    bot::start::start_bot(client).await
}
