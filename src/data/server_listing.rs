use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

/// Provisioned resources for one member server, keyed by guild id.
pub struct UpsertListing {
    pub guild_id: u64,
    pub guild_name: String,
    pub category_id: Option<u64>,
    pub network_channel_id: Option<u64>,
    pub leaderboard_channel_id: Option<u64>,
    pub invite_link: Option<String>,
}

pub struct ServerListingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServerListingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or refreshes the directory entry for a guild.
    ///
    /// Re-running setup for a guild overwrites every provisioned field, so a
    /// listing always reflects the most recent setup pass.
    pub async fn upsert(
        &self,
        listing: UpsertListing,
    ) -> Result<entity::server_listing::Model, DbErr> {
        entity::prelude::ServerListing::insert(entity::server_listing::ActiveModel {
            guild_id: ActiveValue::Set(listing.guild_id.to_string()),
            guild_name: ActiveValue::Set(listing.guild_name),
            category_id: ActiveValue::Set(listing.category_id.map(|id| id.to_string())),
            network_channel_id: ActiveValue::Set(
                listing.network_channel_id.map(|id| id.to_string()),
            ),
            leaderboard_channel_id: ActiveValue::Set(
                listing.leaderboard_channel_id.map(|id| id.to_string()),
            ),
            invite_link: ActiveValue::Set(listing.invite_link),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::server_listing::Column::GuildId)
                .update_columns([
                    entity::server_listing::Column::GuildName,
                    entity::server_listing::Column::CategoryId,
                    entity::server_listing::Column::NetworkChannelId,
                    entity::server_listing::Column::LeaderboardChannelId,
                    entity::server_listing::Column::InviteLink,
                    entity::server_listing::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }

    /// Every listed member server, in insertion order.
    pub async fn get_all(&self) -> Result<Vec<entity::server_listing::Model>, DbErr> {
        entity::prelude::ServerListing::find().all(self.db).await
    }

    pub async fn find_by_guild_id(
        &self,
        guild_id: u64,
    ) -> Result<Option<entity::server_listing::Model>, DbErr> {
        entity::prelude::ServerListing::find()
            .filter(entity::server_listing::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await
    }
}
