use crate::utils::{TestPeer, room};
use crate::{create_relay, init_tracing};

#[tokio::test]
async fn test_disconnect_triggers_member_left() {
    init_tracing();
    let relay = create_relay();
    let room_id = room("AB12CD");

    let mut u1 = TestPeer::connect(&relay, "u1");
    let mut u2 = TestPeer::connect(&relay, "u2");
    u1.join(&relay, &room_id).expect("u1 join failed");
    u2.join(&relay, &room_id).expect("u2 join failed");

    u1.expect_room_users().await.expect("no snapshot for u1");
    u2.expect_room_users().await.expect("no snapshot for u2");
    u1.expect_user_joined().await.expect("no user-joined");

    // u2 drops without sending leave-room
    relay.on_disconnect(u2.connection_id);
    relay.unregister_connection(&u2.connection_id);

    let left = u1.expect_member_left().await.expect("no member-left");
    assert_eq!(left, u2.connection_id);

    let members = relay.registry().members_of(&room_id);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].connection_id, u1.connection_id);

    // a repeated disconnect is silent
    relay.on_disconnect(u2.connection_id);
    assert!(!u1.has_pending_event());
}
