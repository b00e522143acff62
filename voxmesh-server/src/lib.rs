pub mod directory;
pub mod registry;
pub mod relay;

pub use directory::*;
pub use registry::*;
pub use relay::*;

use std::sync::Arc;

/// Shared state handed to the axum handlers.
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
    pub relay: SignalingRelay,
    pub directory: RoomDirectory,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let registry = Arc::new(RoomRegistry::new());
        let relay = SignalingRelay::new(registry.clone());
        let directory = RoomDirectory::new(registry.clone());
        Arc::new(Self {
            registry,
            relay,
            directory,
        })
    }
}
