mod connection_tests;
mod messaging_tests;
mod multi_peer_tests;
mod utils;

use std::sync::Arc;
use tracing::Level;
use voxmesh_server::{RoomRegistry, SignalingRelay};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_relay() -> SignalingRelay {
    SignalingRelay::new(Arc::new(RoomRegistry::new()))
}
