//! Directory of alliance member servers and their provisioned channels.
//!
//! One row per guild the bot has set up. The network channel is the broadcast
//! destination for SOS fan-out; the leaderboard channel receives the periodic
//! leaderboard republish. Discord snowflakes are stored as strings to avoid
//! precision loss in SQLite.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "server_listing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guild_id: String,
    pub guild_name: String,
    pub category_id: Option<String>,
    pub network_channel_id: Option<String>,
    pub leaderboard_channel_id: Option<String>,
    pub invite_link: Option<String>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
