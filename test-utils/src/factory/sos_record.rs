//! SOS record factory for creating test audit rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test SOS audit records with customizable fields.
pub struct SosRecordFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    user_nickname: String,
    enemy: Option<String>,
    difficulty: Option<String>,
    mission: Option<String>,
    voice: Option<String>,
    notes: Option<String>,
}

impl<'a> SosRecordFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - discord_id: auto-incremented unique id
    /// - user_nickname: `"Helldiver {id}"`
    /// - all attributes: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: id.to_string(),
            user_nickname: format!("Helldiver {}", id),
            enemy: None,
            difficulty: None,
            mission: None,
            voice: None,
            notes: None,
        }
    }

    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = discord_id.into();
        self
    }

    pub fn user_nickname(mut self, user_nickname: impl Into<String>) -> Self {
        self.user_nickname = user_nickname.into();
        self
    }

    pub fn enemy(mut self, enemy: Option<String>) -> Self {
        self.enemy = enemy;
        self
    }

    pub fn difficulty(mut self, difficulty: Option<String>) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn mission(mut self, mission: Option<String>) -> Self {
        self.mission = mission;
        self
    }

    pub fn voice(mut self, voice: Option<String>) -> Self {
        self.voice = voice;
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Inserts the configured record into the database.
    pub async fn build(self) -> Result<entity::sos_record::Model, DbErr> {
        entity::sos_record::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            user_nickname: ActiveValue::Set(self.user_nickname),
            enemy: ActiveValue::Set(self.enemy),
            difficulty: ActiveValue::Set(self.difficulty),
            mission: ActiveValue::Set(self.mission),
            voice: ActiveValue::Set(self.voice),
            notes: ActiveValue::Set(self.notes),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an SOS audit record with default values.
pub async fn create_sos_record(
    db: &DatabaseConnection,
) -> Result<entity::sos_record::Model, DbErr> {
    SosRecordFactory::new(db).build().await
}
