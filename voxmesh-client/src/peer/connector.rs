use crate::media::LocalMedia;
use std::sync::Arc;
use tokio::sync::mpsc;
use voxmesh_core::ConnectionId;

/// Which side of a mesh edge offers first. Assigned once per pair by the
/// session controller: a remote seen in the join snapshot gets a local
/// Initiator, a remote that joins later gets a local Responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerRole {
    Initiator,
    Responder,
}

/// Asynchronous notifications from one peer connection, delivered to the
/// session controller's event loop instead of nested callbacks.
#[derive(Debug, Clone)]
pub enum PeerEvent {
    /// A locally produced connection-setup blob (offer, answer or
    /// candidate) that must be relayed to the remote side.
    LocalSignal(serde_json::Value),
    /// The first remote media arrived; the edge is live.
    RemoteStream,
    /// The transport closed from its own side.
    Closed,
    /// Unrecoverable transport failure.
    Failed(String),
}

/// Black-box media transport for one mesh edge. ICE gathering, codec
/// negotiation and encryption all live behind this trait.
pub trait PeerConnection: Send {
    /// Feed a connection-setup blob received from the remote side.
    fn apply_remote_signal(&mut self, payload: serde_json::Value);

    /// Whether the underlying negotiation is in its stable phase. Used to
    /// refuse re-answering an already settled exchange.
    fn is_stable(&self) -> bool;

    fn close(&mut self);
}

/// Factory for peer connections. Events for the connection are tagged with
/// the remote's id and pushed into the supplied channel.
pub trait PeerConnector: Send + Sync {
    fn connect(
        &self,
        remote: ConnectionId,
        role: PeerRole,
        media: Arc<dyn LocalMedia>,
        events: mpsc::UnboundedSender<(ConnectionId, PeerEvent)>,
    ) -> Box<dyn PeerConnection>;
}
