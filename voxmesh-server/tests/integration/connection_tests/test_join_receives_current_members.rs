use crate::utils::{TestPeer, room};
use crate::{create_relay, init_tracing};

#[tokio::test]
async fn test_join_receives_current_members() {
    init_tracing();
    let relay = create_relay();
    let room_id = room("AB12CD");

    let mut u1 = TestPeer::connect(&relay, "u1");
    u1.join(&relay, &room_id).expect("u1 join failed");

    // first joiner sees an empty room
    let users = u1.expect_room_users().await.expect("no snapshot for u1");
    assert!(users.is_empty());

    let mut u2 = TestPeer::connect(&relay, "u2");
    u2.join(&relay, &room_id).expect("u2 join failed");

    // the snapshot excludes the joiner itself
    let users = u2.expect_room_users().await.expect("no snapshot for u2");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].connection_id, u1.connection_id);
    assert_eq!(users[0].identity, u1.identity);

    // the existing member is told about the newcomer instead
    let joined = u1.expect_user_joined().await.expect("no user-joined");
    assert_eq!(joined.connection_id, u2.connection_id);
    assert_eq!(joined.identity, u2.identity);

    assert!(!u1.has_pending_event());
    assert!(!u2.has_pending_event());
}

#[tokio::test]
async fn test_double_join_is_rejected_without_events() {
    init_tracing();
    let relay = create_relay();

    let mut u1 = TestPeer::connect(&relay, "u1");
    u1.join(&relay, &room("AB12CD")).expect("first join failed");
    u1.expect_room_users().await.expect("no snapshot");

    assert!(u1.join(&relay, &room("EF34GH")).is_err());
    assert!(!u1.has_pending_event());

    // still a member of the original room only
    let members = relay.registry().members_of(&room("AB12CD"));
    assert_eq!(members.len(), 1);
    assert!(relay.registry().members_of(&room("EF34GH")).is_empty());
}
