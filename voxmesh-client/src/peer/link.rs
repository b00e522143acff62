use crate::peer::connector::{PeerConnection, PeerRole};
use voxmesh_core::ConnectionId;

/// Lifecycle of one mesh edge. Role assignment happens at creation, so a
/// live link starts at `RoleAssigned`; `Closed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerState {
    RoleAssigned,
    SignalExchanging,
    Connected,
    Closed,
    Failed,
}

/// What happened to an incoming remote signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
    Applied,
    /// An answer arrived while the negotiation was already settled. A
    /// stable connection must never be re-answered; this is a stale or
    /// duplicate delivery, not a renegotiation request.
    DiscardedStableAnswer,
    /// The link already reached `Closed` or `Failed`.
    DiscardedTerminal,
}

/// One participant's managed half of a mesh edge. Owned exclusively by the
/// session controller; never touched from two tasks.
pub struct PeerLink {
    remote: ConnectionId,
    role: PeerRole,
    state: PeerState,
    connection: Box<dyn PeerConnection>,
}

impl PeerLink {
    pub fn new(remote: ConnectionId, role: PeerRole, connection: Box<dyn PeerConnection>) -> Self {
        Self {
            remote,
            role,
            state: PeerState::RoleAssigned,
            connection,
        }
    }

    pub fn remote(&self) -> ConnectionId {
        self.remote
    }

    pub fn role(&self) -> PeerRole {
        self.role
    }

    pub fn state(&self) -> PeerState {
        self.state
    }

    /// The handle started producing local signals; the exchange is on.
    pub fn on_local_signal(&mut self) {
        if self.state == PeerState::RoleAssigned {
            self.state = PeerState::SignalExchanging;
        }
    }

    pub fn apply_remote_signal(&mut self, payload: serde_json::Value) -> SignalOutcome {
        if self.is_terminal() {
            return SignalOutcome::DiscardedTerminal;
        }
        if is_answer(&payload) && (self.state == PeerState::Connected || self.connection.is_stable())
        {
            return SignalOutcome::DiscardedStableAnswer;
        }
        if self.state == PeerState::RoleAssigned {
            self.state = PeerState::SignalExchanging;
        }
        self.connection.apply_remote_signal(payload);
        SignalOutcome::Applied
    }

    /// First remote media callback: the edge is established.
    pub fn on_remote_stream(&mut self) {
        if matches!(
            self.state,
            PeerState::RoleAssigned | PeerState::SignalExchanging
        ) {
            self.state = PeerState::Connected;
        }
    }

    /// Release the transport exactly once; repeated calls are no-ops.
    pub fn close(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.connection.close();
        self.state = PeerState::Closed;
    }

    /// Terminal failure; releases the transport like `close`.
    pub fn fail(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.connection.close();
        self.state = PeerState::Failed;
    }

    fn is_terminal(&self) -> bool {
        matches!(self.state, PeerState::Closed | PeerState::Failed)
    }
}

fn is_answer(payload: &serde_json::Value) -> bool {
    payload.get("type").and_then(serde_json::Value::as_str) == Some("answer")
}
