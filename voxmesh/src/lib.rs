pub use voxmesh_core::model::{ConnectionId, Identity, RoomId};

pub mod model {
    pub use voxmesh_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use voxmesh_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use voxmesh_client::*;
}
