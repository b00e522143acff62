pub mod media;
pub mod peer;
pub mod session;

pub use media::{LocalMedia, MediaError, MediaSource};
pub use peer::{
    PeerConnection, PeerConnector, PeerEvent, PeerLink, PeerRole, PeerState, SignalOutcome,
};
pub use session::{
    LinkStatus, Participant, RelayLink, RoomSession, SessionCommand, SessionError,
};
