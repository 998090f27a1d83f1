use super::*;

use std::time::Duration;

use tokio::time::sleep;

use crate::sos::lifecycle::TEARDOWN_DELAY;

/// Tests that an emptied channel is reclaimed after the full delay.
///
/// Runs on a paused clock; awaiting past the delay drives the armed timer.
#[tokio::test(start_paused = true)]
async fn empty_channel_is_torn_down_after_delay() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(2)).await;

    lifecycle.on_leave(created.request_id).await;

    // Just short of the delay the request must still be live
    sleep(TEARDOWN_DELAY - Duration::from_secs(1)).await;
    assert!(lifecycle.registry().get(created.request_id).is_some());

    sleep(Duration::from_secs(2)).await;

    assert!(lifecycle.registry().is_empty());
    assert_eq!(gateway.deleted_channels(), vec![created.request_id]);
    assert!(gateway.live_views().is_empty());
    assert_eq!(gateway.deleted_messages().len(), 2);
}

/// Tests that a rejoin inside the grace period cancels the pending
/// teardown and the request keeps working afterwards.
#[tokio::test(start_paused = true)]
async fn rejoin_cancels_pending_teardown() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(1)).await;

    lifecycle.on_leave(created.request_id).await;
    sleep(Duration::from_secs(30)).await;

    gateway.set_member_count(created.request_id, 1);
    lifecycle.on_join(created.request_id, 2, "Second").await;

    // Well past the original deadline nothing was reclaimed
    sleep(TEARDOWN_DELAY * 2).await;
    assert!(lifecycle.registry().get(created.request_id).is_some());
    assert!(gateway.deleted_channels().is_empty());

    lifecycle.on_join(created.request_id, 3, "Third").await;
    let active = lifecycle.registry().get(created.request_id).unwrap();
    assert_eq!(active.state.lock().await.participants.len(), 3);
}

/// Tests a leave event while other members remain connected.
///
/// Expected: no timer armed, request untouched.
#[tokio::test(start_paused = true)]
async fn occupied_channel_is_not_scheduled() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(1)).await;

    gateway.set_member_count(created.request_id, 2);
    lifecycle.on_leave(created.request_id).await;

    sleep(TEARDOWN_DELAY * 2).await;
    assert!(lifecycle.registry().get(created.request_id).is_some());
    assert!(gateway.deleted_channels().is_empty());
}

/// Tests that repeated leave events arm at most one timer.
///
/// Expected: a single teardown; the channel delete happens once.
#[tokio::test(start_paused = true)]
async fn repeated_leaves_arm_a_single_timer() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(1)).await;

    lifecycle.on_leave(created.request_id).await;
    sleep(Duration::from_secs(10)).await;
    lifecycle.on_leave(created.request_id).await;

    sleep(TEARDOWN_DELAY * 2).await;
    assert!(lifecycle.registry().is_empty());
    assert_eq!(gateway.deleted_channels(), vec![created.request_id]);
}

/// Tests a leave event for a channel with no live request.
#[tokio::test(start_paused = true)]
async fn unknown_request_is_a_no_op() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());

    lifecycle.on_leave(424242).await;

    sleep(TEARDOWN_DELAY * 2).await;
    assert!(gateway.deleted_channels().is_empty());
}

/// Tests that an unreadable occupancy query leaves the request alone.
///
/// Expected: no timer armed; a later sweep reclaims genuinely dead
/// requests instead.
#[tokio::test(start_paused = true)]
async fn unreadable_occupancy_skips_scheduling() {
    let gateway = MockGateway::new();
    let lifecycle = lifecycle(gateway.clone());
    let created = launch(&lifecycle, &destinations(1)).await;

    gateway.make_member_count_unavailable();
    lifecycle.on_leave(created.request_id).await;

    sleep(TEARDOWN_DELAY * 2).await;
    assert!(lifecycle.registry().get(created.request_id).is_some());
    assert!(gateway.deleted_channels().is_empty());
}
