use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, Colour, CreateEmbed, CreateEmbedFooter, CreateMessage, GetMessages};
use serenity::http::Http;

use crate::data::{ServerListingRepository, UserStatRepository};
use crate::error::AppError;

/// Players shown per leaderboard embed.
pub const PAGE_SIZE: usize = 25;

const LEADERBOARD_TITLE: &str = "ALLIANCE LEADERBOARD";
const LEADERBOARD_FOOTER: &str = "Leaderboard updates every 8 hours. Reset monthly.";

/// Aggregated standings for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub clan: Option<String>,
    pub missions: usize,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    /// Hit percentage over all recorded shots, 0 when none were fired.
    pub accuracy: f64,
}

/// Republishes the leaderboard to every member server that has a
/// leaderboard channel provisioned.
pub struct LeaderboardService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
}

impl<'a> LeaderboardService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Best-effort per destination: a server whose channel rejects the post
    /// is logged and skipped.
    pub async fn publish_all(&self, bot_user_id: u64) -> Result<(), AppError> {
        let listings = ServerListingRepository::new(self.db).get_all().await?;
        let stats = UserStatRepository::new(self.db).get_all().await?;

        let clans: HashMap<String, String> = listings
            .iter()
            .map(|listing| (listing.guild_id.clone(), listing.guild_name.clone()))
            .collect();

        let entries = aggregate(&stats, &clans);
        let pages = build_pages(&entries);

        for listing in &listings {
            let Some(channel_id) = listing
                .leaderboard_channel_id
                .as_ref()
                .and_then(|id| id.parse::<u64>().ok())
            else {
                continue;
            };

            if let Err(err) = self.publish_to(channel_id, &pages, bot_user_id).await {
                tracing::error!(
                    "Failed to publish leaderboard to guild {}: {}",
                    listing.guild_id,
                    err
                );
            }
        }

        Ok(())
    }

    /// Replaces the bot's previous leaderboard posts in one channel.
    async fn publish_to(
        &self,
        channel_id: u64,
        pages: &[String],
        bot_user_id: u64,
    ) -> Result<(), AppError> {
        let channel = ChannelId::new(channel_id);

        let recent = channel
            .messages(&self.http, GetMessages::new().limit(10))
            .await?;

        for message in recent {
            let is_old_page = message.author.id.get() == bot_user_id
                && message
                    .embeds
                    .first()
                    .is_some_and(|embed| embed.title.as_deref() == Some(LEADERBOARD_TITLE));

            if is_old_page {
                if let Err(err) = channel.delete_message(&self.http, message.id).await {
                    tracing::warn!(
                        "Failed to delete stale leaderboard message {}: {}",
                        message.id,
                        err
                    );
                }
            }
        }

        for (index, page) in pages.iter().enumerate() {
            let embed = page_to_embed(page, index, pages.len());
            channel
                .send_message(&self.http, CreateMessage::new().embed(embed))
                .await?;
        }

        Ok(())
    }
}

/// Collapses raw mission rows into per-player standings, best average kill
/// count first. Ties keep name order so repeated runs render identically.
pub fn aggregate(
    stats: &[entity::user_stat::Model],
    clans: &HashMap<String, String>,
) -> Vec<LeaderboardEntry> {
    struct Totals {
        clan: Option<String>,
        missions: usize,
        kills: i64,
        deaths: i64,
        shots_fired: i64,
        shots_hit: i64,
    }

    let mut totals: HashMap<&str, Totals> = HashMap::new();

    for stat in stats {
        let entry = totals.entry(&stat.player_name).or_insert(Totals {
            clan: None,
            missions: 0,
            kills: 0,
            deaths: 0,
            shots_fired: 0,
            shots_hit: 0,
        });
        entry.missions += 1;
        entry.kills += i64::from(stat.kills);
        entry.deaths += i64::from(stat.deaths);
        entry.shots_fired += i64::from(stat.shots_fired);
        entry.shots_hit += i64::from(stat.shots_hit);

        // Most recent row with a known guild wins the clan attribution
        if let Some(clan) = stat.guild_id.as_ref().and_then(|id| clans.get(id)) {
            entry.clan = Some(clan.clone());
        }
    }

    let mut entries: Vec<LeaderboardEntry> = totals
        .into_iter()
        .map(|(player_name, totals)| {
            let missions = totals.missions as f64;
            let accuracy = if totals.shots_fired > 0 {
                totals.shots_hit as f64 / totals.shots_fired as f64 * 100.0
            } else {
                0.0
            };
            LeaderboardEntry {
                player_name: player_name.to_string(),
                clan: totals.clan,
                missions: totals.missions,
                avg_kills: totals.kills as f64 / missions,
                avg_deaths: totals.deaths as f64 / missions,
                accuracy,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.avg_kills
            .partial_cmp(&a.avg_kills)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });

    entries
}

/// Two decimal places with trailing zeros stripped: 12.50 -> "12.5",
/// 12.00 -> "12".
pub fn format_stat(value: f64) -> String {
    let rendered = format!("{:.2}", value);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Renders ranked entries into page-sized description blocks.
pub fn build_pages(entries: &[LeaderboardEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No mission statistics recorded yet.".to_string()];
    }

    entries
        .chunks(PAGE_SIZE)
        .enumerate()
        .map(|(page_index, chunk)| {
            chunk
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    let rank = page_index * PAGE_SIZE + index + 1;
                    let clan = entry.clan.as_deref().unwrap_or("Unaffiliated");
                    format!(
                        "**{}. {}** ({})\nMissions: {} | Avg Kills: {} | Avg Deaths: {} | Accuracy: {}%",
                        rank,
                        entry.player_name,
                        clan,
                        entry.missions,
                        format_stat(entry.avg_kills),
                        format_stat(entry.avg_deaths),
                        format_stat(entry.accuracy),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n")
        })
        .collect()
}

fn page_to_embed(page: &str, index: usize, total: usize) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(LEADERBOARD_TITLE)
        .description(page.to_string())
        .colour(Colour::GOLD)
        .footer(CreateEmbedFooter::new(LEADERBOARD_FOOTER));

    if total > 1 {
        embed = embed.field(
            "Page",
            format!("{} of {}", index + 1, total),
            false,
        );
    }

    embed
}
