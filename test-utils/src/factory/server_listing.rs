//! Server listing factory for creating test directory rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test server listings with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::server_listing::ServerListingFactory;
///
/// let listing = ServerListingFactory::new(&db)
///     .guild_id("987654321")
///     .guild_name("Test Clan")
///     .network_channel_id(Some("111".to_string()))
///     .build()
///     .await?;
/// ```
pub struct ServerListingFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    guild_name: String,
    category_id: Option<String>,
    network_channel_id: Option<String>,
    leaderboard_channel_id: Option<String>,
    invite_link: Option<String>,
}

impl<'a> ServerListingFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented unique id
    /// - guild_name: `"Clan {id}"`
    /// - all channel ids and the invite link: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            guild_name: format!("Clan {}", id),
            category_id: None,
            network_channel_id: None,
            leaderboard_channel_id: None,
            invite_link: None,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn guild_name(mut self, guild_name: impl Into<String>) -> Self {
        self.guild_name = guild_name.into();
        self
    }

    pub fn category_id(mut self, category_id: Option<String>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn network_channel_id(mut self, network_channel_id: Option<String>) -> Self {
        self.network_channel_id = network_channel_id;
        self
    }

    pub fn leaderboard_channel_id(mut self, leaderboard_channel_id: Option<String>) -> Self {
        self.leaderboard_channel_id = leaderboard_channel_id;
        self
    }

    pub fn invite_link(mut self, invite_link: Option<String>) -> Self {
        self.invite_link = invite_link;
        self
    }

    /// Inserts the configured listing into the database.
    pub async fn build(self) -> Result<entity::server_listing::Model, DbErr> {
        entity::server_listing::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            guild_name: ActiveValue::Set(self.guild_name),
            category_id: ActiveValue::Set(self.category_id),
            network_channel_id: ActiveValue::Set(self.network_channel_id),
            leaderboard_channel_id: ActiveValue::Set(self.leaderboard_channel_id),
            invite_link: ActiveValue::Set(self.invite_link),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a server listing with default values.
pub async fn create_listing(
    db: &DatabaseConnection,
) -> Result<entity::server_listing::Model, DbErr> {
    ServerListingFactory::new(db).build().await
}
