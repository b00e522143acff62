use crate::utils::{TestPeer, room};
use crate::{create_relay, init_tracing};
use serde_json::json;

#[tokio::test]
async fn test_signal_forwarded_verbatim() {
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

    let payload = json!({
        "type": "offer",
        "sdp": "v=0\r\no=- 46117317 2 IN IP4 127.0.0.1\r\n",
        "candidates": [{"candidate": "candidate:1 1 UDP 2122252543"}],
    });
    relay.on_signal(
        u1.connection_id,
        room_id.clone(),
        u2.connection_id,
        payload.clone(),
    );

    let (from, received) = u2.expect_signal().await.expect("no signal at u2");
    assert_eq!(from, u1.connection_id);
    assert_eq!(received, payload);

    // the sender gets no echo
    assert!(!u1.has_pending_event());
}
