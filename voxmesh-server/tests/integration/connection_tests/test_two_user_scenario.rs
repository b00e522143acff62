use crate::utils::{TestPeer, room};
use crate::{create_relay, init_tracing};
use serde_json::json;

/// The full two-participant lifecycle: join ordering, offer/answer relay,
/// abrupt disconnect.
#[tokio::test]
async fn test_two_user_scenario() {
    init_tracing();
    let relay = create_relay();
    let room_id = room("AB12CD");

    let mut u1 = TestPeer::connect(&relay, "U1");
    u1.join(&relay, &room_id).expect("U1 join failed");
    let users = u1.expect_room_users().await.expect("no snapshot for U1");
    assert!(users.is_empty());

    // U1 hears nothing about U2 before U2's join completes
    assert!(!u1.has_pending_event());

    let mut u2 = TestPeer::connect(&relay, "U2");
    u2.join(&relay, &room_id).expect("U2 join failed");

    let users = u2.expect_room_users().await.expect("no snapshot for U2");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].identity.as_str(), "U1");

    let joined = u1.expect_user_joined().await.expect("no user-joined");
    assert_eq!(joined.connection_id, u2.connection_id);

    // U2 saw U1 in the snapshot, so U2 initiates
    let offer = json!({"type": "offer", "sdp": "v=0 u2"});
    relay.on_signal(
        u2.connection_id,
        room_id.clone(),
        u1.connection_id,
        offer.clone(),
    );
    let (from, payload) = u1.expect_signal().await.expect("no offer at U1");
    assert_eq!(from, u2.connection_id);
    assert_eq!(payload, offer);

    let answer = json!({"type": "answer", "sdp": "v=0 u1"});
    relay.on_signal(
        u1.connection_id,
        room_id.clone(),
        u2.connection_id,
        answer.clone(),
    );
    let (from, payload) = u2.expect_signal().await.expect("no answer at U2");
    assert_eq!(from, u1.connection_id);
    assert_eq!(payload, answer);

    // U2 disconnects abruptly, no leave-room
    relay.on_disconnect(u2.connection_id);
    relay.unregister_connection(&u2.connection_id);

    let left = u1.expect_member_left().await.expect("no member-left");
    assert_eq!(left, u2.connection_id);
    assert!(!u1.has_pending_event());
}
