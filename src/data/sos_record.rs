use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::sos::render::SosAttributes;

pub struct SosRecordRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SosRecordRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends one audit row for a launched SOS.
    pub async fn create(
        &self,
        discord_id: u64,
        user_nickname: &str,
        attributes: &SosAttributes,
    ) -> Result<entity::sos_record::Model, DbErr> {
        entity::sos_record::ActiveModel {
            discord_id: ActiveValue::Set(discord_id.to_string()),
            user_nickname: ActiveValue::Set(user_nickname.to_string()),
            enemy: ActiveValue::Set(attributes.enemy.clone()),
            difficulty: ActiveValue::Set(attributes.difficulty.clone()),
            mission: ActiveValue::Set(attributes.mission.clone()),
            voice: ActiveValue::Set(attributes.voice.clone()),
            notes: ActiveValue::Set(attributes.notes.clone()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
