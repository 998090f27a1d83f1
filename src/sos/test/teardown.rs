use super::*;

/// Tests that teardown removes the request and every remote resource.
#[tokio::test]
async fn reclaims_channel_and_broadcast_copies() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(3)).await;

    lifecycle.teardown(created.request_id).await;

    assert!(lifecycle.registry().is_empty());
    assert_eq!(gateway.deleted_channels(), vec![created.request_id]);
    assert_eq!(gateway.deleted_messages().len(), 3);
    assert!(gateway.live_views().is_empty());
}

/// Tests running teardown twice for the same request.
///
/// Expected: the second call is a no-op; nothing is deleted again.
#[tokio::test]
async fn second_teardown_is_a_no_op() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(2)).await;

    lifecycle.teardown(created.request_id).await;
    lifecycle.teardown(created.request_id).await;

    assert_eq!(gateway.deleted_channels(), vec![created.request_id]);
    assert_eq!(gateway.deleted_messages().len(), 2);
}

/// Tests teardown racing a member who joined after the timer fired.
///
/// Expected: the occupancy re-check aborts the teardown and the request
/// stays live.
#[tokio::test]
async fn aborts_when_channel_regained_members() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(2)).await;

    gateway.set_member_count(created.request_id, 1);
    lifecycle.teardown(created.request_id).await;

    assert!(lifecycle.registry().get(created.request_id).is_some());
    assert!(gateway.deleted_channels().is_empty());
    assert_eq!(gateway.live_views().len(), 2);
}

/// Tests teardown when the occupancy query fails.
///
/// Expected: teardown skipped rather than deleting a possibly occupied
/// channel.
#[tokio::test]
async fn aborts_when_occupancy_is_unreadable() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(1)).await;

    gateway.make_member_count_unavailable();
    lifecycle.teardown(created.request_id).await;

    assert!(lifecycle.registry().get(created.request_id).is_some());
    assert!(gateway.deleted_channels().is_empty());
}

/// Tests teardown for a request that was never registered.
#[tokio::test]
async fn unknown_request_is_a_no_op() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());

    lifecycle.teardown(424242).await;

    assert!(gateway.deleted_channels().is_empty());
    assert!(gateway.deleted_messages().is_empty());
}
