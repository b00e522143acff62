use crate::media::{LocalMedia, MediaError, MediaSource};
use crate::peer::{PeerConnector, PeerEvent, PeerLink, PeerRole, PeerState, SignalOutcome};
use crate::session::relay_link::RelayLink;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use voxmesh_core::{ClientMessage, ConnectionId, Identity, RoomId, ServerEvent};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    MediaUnavailable(#[from] MediaError),
}

/// Connection status of one remote participant, derived from its peer
/// link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Connecting,
    Connected,
    /// The mesh edge failed or closed while the participant is still in
    /// the room.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub identity: Identity,
    pub status: LinkStatus,
}

/// External control of a running session loop.
#[derive(Debug)]
pub enum SessionCommand {
    /// Flip the local mute and report the new state.
    ToggleMute(oneshot::Sender<bool>),
    Exit,
}

/// Per-client orchestrator for one room: owns the peer-link table, the
/// shared local capture and the observable participant list. All mutation
/// happens on whichever task drives the handlers, one event at a time.
pub struct RoomSession {
    room_id: RoomId,
    identity: Identity,
    media: Arc<dyn LocalMedia>,
    muted: bool,
    connector: Arc<dyn PeerConnector>,
    relay: Arc<dyn RelayLink>,
    links: HashMap<ConnectionId, PeerLink>,
    roster: Vec<(ConnectionId, Identity)>,
    peer_events_tx: mpsc::UnboundedSender<(ConnectionId, PeerEvent)>,
    peer_events_rx: Option<mpsc::UnboundedReceiver<(ConnectionId, PeerEvent)>>,
    exited: bool,
}

impl RoomSession {
    /// Acquire the local capture and join the room. Media comes first: if
    /// the device cannot be opened, entry fails with nothing to unwind.
    pub async fn enter(
        room_id: RoomId,
        identity: Identity,
        media_source: &dyn MediaSource,
        connector: Arc<dyn PeerConnector>,
        relay: Arc<dyn RelayLink>,
    ) -> Result<Self, SessionError> {
        let media = media_source.acquire().await?;

        relay
            .send(ClientMessage::JoinRoom {
                room_id: room_id.clone(),
                identity: identity.clone(),
            })
            .await;
        info!(%room_id, %identity, "joining room");

        let (peer_events_tx, peer_events_rx) = mpsc::unbounded_channel();
        Ok(Self {
            room_id,
            identity,
            media,
            muted: false,
            connector,
            relay,
            links: HashMap::new(),
            roster: Vec::new(),
            peer_events_tx,
            peer_events_rx: Some(peer_events_rx),
            exited: false,
        })
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Remote participants in join order with their connection status.
    pub fn participants(&self) -> Vec<Participant> {
        self.roster
            .iter()
            .map(|(connection_id, identity)| Participant {
                connection_id: *connection_id,
                identity: identity.clone(),
                status: match self.links.get(connection_id).map(PeerLink::state) {
                    Some(PeerState::Connected) => LinkStatus::Connected,
                    Some(PeerState::RoleAssigned) | Some(PeerState::SignalExchanging) => {
                        LinkStatus::Connecting
                    }
                    _ => LinkStatus::Unavailable,
                },
            })
            .collect()
    }

    pub fn link_state(&self, remote: &ConnectionId) -> Option<PeerState> {
        self.links.get(remote).map(PeerLink::state)
    }

    pub fn link_role(&self, remote: &ConnectionId) -> Option<PeerRole> {
        self.links.get(remote).map(PeerLink::role)
    }

    pub async fn handle_server_event(&mut self, event: ServerEvent) {
        if self.exited {
            return;
        }
        match event {
            // everyone already present when we arrived: we offer
            ServerEvent::RoomUsers { users } => {
                for user in users {
                    self.add_participant(user.connection_id, user.identity, PeerRole::Initiator);
                }
            }
            // a later arrival offers to us
            ServerEvent::UserJoined {
                connection_id,
                identity,
            } => {
                self.add_participant(connection_id, identity, PeerRole::Responder);
            }
            ServerEvent::VoiceSignal { from, payload } => {
                let Some(link) = self.links.get_mut(&from) else {
                    debug!(%from, "signal for unknown peer, dropping");
                    return;
                };
                match link.apply_remote_signal(payload) {
                    SignalOutcome::Applied => {}
                    SignalOutcome::DiscardedStableAnswer => {
                        warn!(%from, "answer received in stable state, discarding");
                    }
                    SignalOutcome::DiscardedTerminal => {
                        debug!(%from, "signal for finished peer link, dropping");
                    }
                }
            }
            ServerEvent::MemberLeft { connection_id } => {
                self.roster.retain(|(id, _)| *id != connection_id);
                if let Some(mut link) = self.links.remove(&connection_id) {
                    link.close();
                    info!(%connection_id, "peer left, link closed");
                }
            }
        }
    }

    pub async fn handle_peer_event(&mut self, remote: ConnectionId, event: PeerEvent) {
        if self.exited {
            return;
        }
        match event {
            PeerEvent::LocalSignal(payload) => {
                let Some(link) = self.links.get_mut(&remote) else {
                    debug!(%remote, "local signal for removed peer, dropping");
                    return;
                };
                link.on_local_signal();
                self.relay
                    .send(ClientMessage::VoiceSignal {
                        room_id: self.room_id.clone(),
                        to: remote,
                        payload,
                    })
                    .await;
            }
            PeerEvent::RemoteStream => {
                if let Some(link) = self.links.get_mut(&remote) {
                    link.on_remote_stream();
                    info!(%remote, "peer connected");
                }
            }
            PeerEvent::Closed => {
                if let Some(mut link) = self.links.remove(&remote) {
                    link.close();
                    debug!(%remote, "peer link closed by transport");
                }
            }
            PeerEvent::Failed(reason) => {
                // one dead mesh edge never aborts the whole session
                warn!(%remote, "peer connection failed: {reason}");
                if let Some(mut link) = self.links.remove(&remote) {
                    link.fail();
                }
            }
        }
    }

    /// Flip the outgoing audio track. Local only; no relay message and no
    /// peer-link transitions.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.media.set_audio_enabled(!self.muted);
        self.muted
    }

    /// Universal cancellation path: close every link, release the capture,
    /// tell the relay. Safe at any point, repeatable, never leaks the
    /// device or a dangling membership.
    pub async fn exit(&mut self) {
        if self.exited {
            return;
        }
        self.exited = true;

        for link in self.links.values_mut() {
            link.close();
        }
        self.links.clear();
        self.roster.clear();
        self.media.stop();

        self.relay
            .send(ClientMessage::LeaveRoom {
                room_id: self.room_id.clone(),
            })
            .await;
        info!(room_id = %self.room_id, "left room");
    }

    /// Drive the session until the relay stream ends or an `Exit` command
    /// arrives.
    pub async fn run(
        mut self,
        mut relay_rx: mpsc::UnboundedReceiver<ServerEvent>,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    ) {
        let Some(mut peer_rx) = self.peer_events_rx.take() else {
            return;
        };

        loop {
            tokio::select! {
                event = relay_rx.recv() => match event {
                    Some(event) => self.handle_server_event(event).await,
                    None => break,
                },
                Some((remote, event)) = peer_rx.recv() => {
                    self.handle_peer_event(remote, event).await;
                }
                command = commands.recv() => match command {
                    Some(SessionCommand::ToggleMute(reply)) => {
                        let _ = reply.send(self.toggle_mute());
                    }
                    Some(SessionCommand::Exit) | None => break,
                },
            }
            if self.exited {
                break;
            }
        }

        self.exit().await;
    }

    /// The channel peer-connection implementations push their events into.
    pub fn peer_events_sender(&self) -> mpsc::UnboundedSender<(ConnectionId, PeerEvent)> {
        self.peer_events_tx.clone()
    }

    fn add_participant(&mut self, remote: ConnectionId, identity: Identity, role: PeerRole) {
        if self.roster.iter().all(|(id, _)| *id != remote) {
            self.roster.push((remote, identity));
        }
        if self.links.contains_key(&remote) {
            return;
        }
        let connection = self.connector.connect(
            remote,
            role,
            self.media.clone(),
            self.peer_events_tx.clone(),
        );
        self.links.insert(remote, PeerLink::new(remote, role, connection));
        debug!(%remote, ?role, "peer link created");
    }
}
