use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::data::{ServerListingRepository, SosRecordRepository};
use crate::error::AppError;
use crate::gateway::ChatGateway;
use crate::sos::lifecycle::{BroadcastDestination, CreateSosParams, CreatedSos, SosLifecycle};

/// Launch-side orchestration: resolves fan-out destinations from the server
/// directory and records an audit row for each launch.
pub struct SosService<'a, G> {
    db: &'a DatabaseConnection,
    lifecycle: Arc<SosLifecycle<G>>,
}

impl<'a, G: ChatGateway + 'static> SosService<'a, G> {
    pub fn new(db: &'a DatabaseConnection, lifecycle: Arc<SosLifecycle<G>>) -> Self {
        Self { db, lifecycle }
    }

    /// Launches an SOS and broadcasts it to every listed member server.
    ///
    /// The audit record is fire-and-forget: a database hiccup must not take
    /// down a launch that already reserved remote resources.
    pub async fn launch(&self, params: CreateSosParams) -> Result<CreatedSos, AppError> {
        let listings = ServerListingRepository::new(self.db).get_all().await?;
        let destinations = destinations_from_listings(&listings);

        if destinations.is_empty() {
            return Err(AppError::NotFound(
                "No member servers with a network channel are listed".to_string(),
            ));
        }

        let initiator_id = params.initiator_id;
        let initiator_name = params.initiator_name.clone();
        let attributes = params.attributes.clone();

        let created = self.lifecycle.create(params, &destinations).await?;

        if let Err(err) = SosRecordRepository::new(self.db)
            .create(initiator_id, &initiator_name, &attributes)
            .await
        {
            tracing::error!("Failed to record SOS launch by {}: {}", initiator_id, err);
        }

        Ok(created)
    }
}

/// Listings without a provisioned network channel, or with an id that does
/// not parse as a snowflake, are skipped.
fn destinations_from_listings(
    listings: &[entity::server_listing::Model],
) -> Vec<BroadcastDestination> {
    listings
        .iter()
        .filter_map(|listing| {
            let channel_id = listing.network_channel_id.as_ref()?.parse::<u64>().ok()?;
            let guild_id = listing.guild_id.parse::<u64>().ok()?;
            Some(BroadcastDestination {
                guild_id,
                channel_id,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use sea_orm::DbErr;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests that only fully provisioned listings become destinations.
    #[tokio::test]
    async fn skips_unprovisioned_listings() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::ServerListing)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        factory::server_listing::ServerListingFactory::new(db)
            .guild_id("101")
            .network_channel_id(Some("201".to_string()))
            .build()
            .await?;
        factory::server_listing::ServerListingFactory::new(db)
            .guild_id("102")
            .build()
            .await?;

        let listings = crate::data::ServerListingRepository::new(db).get_all().await?;
        let destinations = destinations_from_listings(&listings);

        assert_eq!(
            destinations,
            vec![BroadcastDestination {
                guild_id: 101,
                channel_id: 201,
            }]
        );

        Ok(())
    }

    /// Tests that corrupt snowflake strings are dropped instead of panicking.
    #[tokio::test]
    async fn skips_unparseable_ids() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::ServerListing)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        factory::server_listing::ServerListingFactory::new(db)
            .guild_id("not-a-snowflake")
            .network_channel_id(Some("201".to_string()))
            .build()
            .await?;

        let listings = crate::data::ServerListingRepository::new(db).get_all().await?;
        assert!(destinations_from_listings(&listings).is_empty());

        Ok(())
    }
}
