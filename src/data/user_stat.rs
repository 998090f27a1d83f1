use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

/// One submitted mission result.
pub struct NewUserStat {
    pub player_name: String,
    pub guild_id: Option<u64>,
    pub kills: i32,
    pub deaths: i32,
    pub shots_fired: i32,
    pub shots_hit: i32,
}

pub struct UserStatRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserStatRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, stat: NewUserStat) -> Result<entity::user_stat::Model, DbErr> {
        entity::user_stat::ActiveModel {
            player_name: ActiveValue::Set(stat.player_name),
            guild_id: ActiveValue::Set(stat.guild_id.map(|id| id.to_string())),
            kills: ActiveValue::Set(stat.kills),
            deaths: ActiveValue::Set(stat.deaths),
            shots_fired: ActiveValue::Set(stat.shots_fired),
            shots_hit: ActiveValue::Set(stat.shots_hit),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Every submitted result; the leaderboard service aggregates in memory.
    pub async fn get_all(&self) -> Result<Vec<entity::user_stat::Model>, DbErr> {
        entity::prelude::UserStat::find().all(self.db).await
    }
}
