use super::*;

use crate::sos::render::SosStatus;
use crate::sos::request::SQUAD_SIZE;

/// Tests that a join extends the roster in every broadcast copy.
#[tokio::test]
async fn join_updates_every_copy() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(3)).await;

    lifecycle.on_join(created.request_id, 2, "SecondPilot").await;

    for view in gateway.live_views() {
        let roster = &view.fields.last().unwrap().value;
        assert_eq!(roster, "HostPilot\nSecondPilot");
    }
}

/// Tests that the request closes once the squad is full.
///
/// Expected: the fourth distinct member flips the status, and every copy
/// shows the closed marker.
#[tokio::test]
async fn closes_when_squad_is_full() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(2)).await;

    lifecycle.on_join(created.request_id, 2, "Second").await;
    lifecycle.on_join(created.request_id, 3, "Third").await;

    {
        let active = lifecycle.registry().get(created.request_id).unwrap();
        assert_eq!(active.state.lock().await.status, SosStatus::Open);
    }

    lifecycle.on_join(created.request_id, 4, "Fourth").await;

    let active = lifecycle.registry().get(created.request_id).unwrap();
    let request = active.state.lock().await;
    assert_eq!(request.status, SosStatus::Closed);
    assert_eq!(request.participants.len(), SQUAD_SIZE);

    for view in gateway.live_views() {
        let status = &view.fields[1].value;
        assert_eq!(status, "**Closed**");
    }
}

/// Tests that a member who reconnects is not listed twice.
#[tokio::test]
async fn duplicate_join_is_ignored() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(1)).await;

    lifecycle.on_join(created.request_id, 2, "Second").await;
    lifecycle.on_join(created.request_id, 2, "Second").await;
    lifecycle.on_join(created.request_id, INITIATOR_ID, "HostPilot").await;

    let active = lifecycle.registry().get(created.request_id).unwrap();
    let request = active.state.lock().await;
    assert_eq!(request.participants.len(), 2);
    assert_eq!(request.status, SosStatus::Open);
}

/// Tests that members past the squad size are still recorded without
/// reopening the request.
///
/// Expected: the fifth member appears in the roster and the status stays
/// closed.
#[tokio::test]
async fn late_join_is_recorded_but_does_not_reopen() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(1)).await;

    for (user_id, name) in [(2, "Second"), (3, "Third"), (4, "Fourth")] {
        lifecycle.on_join(created.request_id, user_id, name).await;
    }
    lifecycle.on_join(created.request_id, 5, "Fifth").await;

    let active = lifecycle.registry().get(created.request_id).unwrap();
    let request = active.state.lock().await;
    assert_eq!(request.status, SosStatus::Closed);
    assert_eq!(request.participants.len(), 5);
    assert_eq!(request.participants[4].display_name, "Fifth");
}

/// Tests a join event for a channel with no live request.
///
/// Expected: silent no-op, nothing registered, no gateway traffic.
#[tokio::test]
async fn unknown_request_is_a_no_op() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());

    lifecycle.on_join(424242, 2, "Second").await;

    assert!(lifecycle.registry().is_empty());
    assert!(gateway.live_views().is_empty());
}
