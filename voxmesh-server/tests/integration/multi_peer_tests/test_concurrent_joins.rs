use crate::init_tracing;
use crate::utils::room;
use std::sync::Arc;
use voxmesh_core::{ConnectionId, Identity};
use voxmesh_server::RoomRegistry;

/// Simultaneous joins must produce snapshots from a single serialized
/// history: every snapshot length is distinct and the final member count
/// matches.
#[tokio::test]
async fn test_concurrent_joins_serialize() {
    init_tracing();
    let registry = Arc::new(RoomRegistry::new());
    let room_id = room("AB12CD");
    let joiners = 16;

    let mut handles = Vec::new();
    for i in 0..joiners {
        let registry = registry.clone();
        let room_id = room_id.clone();
        handles.push(std::thread::spawn(move || {
            registry
                .join(
                    ConnectionId::new(),
                    Identity::from(format!("u{i}").as_str()),
                    room_id,
                )
                .map(|snapshot| snapshot.len())
        }));
    }

    let mut lengths: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("join thread panicked").expect("join failed"))
        .collect();
    lengths.sort_unstable();

    let expected: Vec<usize> = (1..=joiners).collect();
    assert_eq!(lengths, expected);
    assert_eq!(registry.members_of(&room_id).len(), joiners);
}
