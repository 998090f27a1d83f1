//! Per-mission player statistics submitted by member servers.
//!
//! Each row is one mission result for one player. The leaderboard service
//! aggregates these into per-player averages; `guild_id` links a row to the
//! submitting server for clan attribution.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_stat")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub player_name: String,
    pub guild_id: Option<String>,
    pub kills: i32,
    pub deaths: i32,
    pub shots_fired: i32,
    pub shots_hit: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
