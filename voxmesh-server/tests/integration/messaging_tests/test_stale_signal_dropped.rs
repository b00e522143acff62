use crate::utils::{TestPeer, room};
use crate::{create_relay, init_tracing};
use serde_json::json;

#[tokio::test]
async fn test_signal_to_departed_member_is_dropped() {
    init_tracing();
    let relay = create_relay();
    let room_id = room("AB12CD");

    let mut u1 = TestPeer::connect(&relay, "u1");
    let mut u2 = TestPeer::connect(&relay, "u2");
    u1.join(&relay, &room_id).expect("u1 join failed");
    u2.join(&relay, &room_id).expect("u2 join failed");
    u1.expect_room_users().await.expect("no snapshot");
    u2.expect_room_users().await.expect("no snapshot");
    u1.expect_user_joined().await.expect("no user-joined");

    relay.on_leave(u2.connection_id);
    u1.expect_member_left().await.expect("no member-left");

    // envelope addressed to the departed member vanishes silently
    relay.on_signal(
        u1.connection_id,
        room_id.clone(),
        u2.connection_id,
        json!({"type": "offer"}),
    );
    assert!(!u2.has_pending_event());
    assert!(!u1.has_pending_event());
}

#[tokio::test]
async fn test_cross_room_signal_is_dropped() {
    init_tracing();
    let relay = create_relay();

    let mut u1 = TestPeer::connect(&relay, "u1");
    let mut u2 = TestPeer::connect(&relay, "u2");
    u1.join(&relay, &room("AB12CD")).expect("u1 join failed");
    u2.join(&relay, &room("EF34GH")).expect("u2 join failed");
    u1.expect_room_users().await.expect("no snapshot");
    u2.expect_room_users().await.expect("no snapshot");

    // members of different rooms never exchange signals
    relay.on_signal(
        u1.connection_id,
        room("AB12CD"),
        u2.connection_id,
        json!({"type": "offer"}),
    );
    assert!(!u2.has_pending_event());

    // nor does claiming the target's room help
    relay.on_signal(
        u1.connection_id,
        room("EF34GH"),
        u2.connection_id,
        json!({"type": "offer"}),
    );
    assert!(!u2.has_pending_event());
}
