use std::sync::Arc;

use crate::sos::lifecycle::{
    BroadcastDestination, CreateSosParams, CreatedSos, SosLifecycle,
};
use crate::sos::registry::SosRegistry;
use crate::sos::render::SosAttributes;

pub mod mock;

mod join;
mod leave;
mod teardown;

use mock::MockGateway;

const HOST_GUILD_ID: u64 = 100;
const INITIATOR_ID: u64 = 42;

fn test_params() -> CreateSosParams {
    CreateSosParams {
        initiator_id: INITIATOR_ID,
        initiator_name: "HostPilot".to_string(),
        attributes: SosAttributes {
            enemy: Some("Automatons".to_string()),
            difficulty: Some("Helldive".to_string()),
            ..Default::default()
        },
        host_guild_id: HOST_GUILD_ID,
        host_guild_name: "First Fleet".to_string(),
        host_category_id: Some(700),
    }
}

/// One destination per member server, channel ids starting at 201.
fn destinations(count: u64) -> Vec<BroadcastDestination> {
    (0..count)
        .map(|index| BroadcastDestination {
            guild_id: 101 + index,
            channel_id: 201 + index,
        })
        .collect()
}

fn lifecycle(gateway: MockGateway) -> Arc<SosLifecycle<MockGateway>> {
    Arc::new(SosLifecycle::new(gateway, Arc::new(SosRegistry::new())))
}

async fn launch(
    lifecycle: &SosLifecycle<MockGateway>,
    destinations: &[BroadcastDestination],
) -> CreatedSos {
    lifecycle
        .create(test_params(), destinations)
        .await
        .expect("launch should succeed")
}
