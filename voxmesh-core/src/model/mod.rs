mod connection;
mod directory;
mod identity;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use directory::RoomInfo;
pub use identity::Identity;
pub use room::{RoomId, RoomIdError};
pub use signaling::{ClientMessage, MemberInfo, ServerEvent};
