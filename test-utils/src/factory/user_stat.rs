//! User stat factory for creating test mission-stat rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test user stats with customizable fields.
pub struct UserStatFactory<'a> {
    db: &'a DatabaseConnection,
    player_name: String,
    guild_id: Option<String>,
    kills: i32,
    deaths: i32,
    shots_fired: i32,
    shots_hit: i32,
}

impl<'a> UserStatFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - player_name: `"Player {id}"` where id is auto-incremented
    /// - guild_id: `None`
    /// - kills: 100, deaths: 5, shots_fired: 1000, shots_hit: 500
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            player_name: format!("Player {}", id),
            guild_id: None,
            kills: 100,
            deaths: 5,
            shots_fired: 1000,
            shots_hit: 500,
        }
    }

    pub fn player_name(mut self, player_name: impl Into<String>) -> Self {
        self.player_name = player_name.into();
        self
    }

    pub fn guild_id(mut self, guild_id: Option<String>) -> Self {
        self.guild_id = guild_id;
        self
    }

    pub fn kills(mut self, kills: i32) -> Self {
        self.kills = kills;
        self
    }

    pub fn deaths(mut self, deaths: i32) -> Self {
        self.deaths = deaths;
        self
    }

    pub fn shots_fired(mut self, shots_fired: i32) -> Self {
        self.shots_fired = shots_fired;
        self
    }

    pub fn shots_hit(mut self, shots_hit: i32) -> Self {
        self.shots_hit = shots_hit;
        self
    }

    /// Inserts the configured stat row into the database.
    pub async fn build(self) -> Result<entity::user_stat::Model, DbErr> {
        entity::user_stat::ActiveModel {
            player_name: ActiveValue::Set(self.player_name),
            guild_id: ActiveValue::Set(self.guild_id),
            kills: ActiveValue::Set(self.kills),
            deaths: ActiveValue::Set(self.deaths),
            shots_fired: ActiveValue::Set(self.shots_fired),
            shots_hit: ActiveValue::Set(self.shots_hit),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user stat row with default values.
pub async fn create_user_stat(db: &DatabaseConnection) -> Result<entity::user_stat::Model, DbErr> {
    UserStatFactory::new(db).build().await
}
