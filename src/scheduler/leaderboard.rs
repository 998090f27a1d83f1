use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::http::Http;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::error::AppError;
use crate::service::leaderboard::LeaderboardService;

/// Starts the leaderboard republish scheduler.
///
/// Runs every eight hours and replaces the standings embeds in every member
/// server's leaderboard channel.
///
/// # Arguments
/// - `db`: Database connection
/// - `discord_http`: Discord HTTP client for sending embeds
/// - `bot_user_id`: Used to recognize the bot's own previous posts
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    bot_user_id: u64,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_http = discord_http.clone();

    let job = Job::new_async("0 0 */8 * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let http = job_http.clone();

        Box::pin(async move {
            if let Err(e) = LeaderboardService::new(&db, http).publish_all(bot_user_id).await {
                tracing::error!("Error publishing leaderboard: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Leaderboard scheduler started");

    Ok(())
}
