use crate::registry::{RegistryError, RoomRegistry};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use voxmesh_core::{ConnectionId, Identity, MemberInfo, RoomId, ServerEvent};

struct RelayInner {
    registry: Arc<RoomRegistry>,
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>,
}

/// Routes signaling payloads and membership-change events to exactly the
/// connections that should see them.
///
/// Events are enqueued onto per-connection channels while the registry
/// guard is still held, so for any one room the event order matches the
/// order in which the registry accepted the operations. Enqueueing never
/// blocks; the socket writes happen later in each connection's writer task.
#[derive(Clone)]
pub struct SignalingRelay {
    inner: Arc<RelayInner>,
}

impl SignalingRelay {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                registry,
                connections: DashMap::new(),
            }),
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.inner.registry
    }

    pub fn register_connection(
        &self,
        connection_id: ConnectionId,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) {
        self.inner.connections.insert(connection_id, tx);
    }

    pub fn unregister_connection(&self, connection_id: &ConnectionId) {
        self.inner.connections.remove(connection_id);
    }

    /// Join the room, send the joiner a `room-users` snapshot (excluding
    /// itself) and everyone else a `user-joined`, both from the same
    /// snapshot instant.
    pub fn on_join(
        &self,
        connection_id: ConnectionId,
        identity: Identity,
        room_id: RoomId,
    ) -> Result<(), RegistryError> {
        let mut registry = self.inner.registry.lock();
        let snapshot = registry.join(connection_id, identity.clone(), room_id)?;

        let users: Vec<MemberInfo> = snapshot
            .iter()
            .filter(|m| m.connection_id != connection_id)
            .map(|m| MemberInfo {
                connection_id: m.connection_id,
                identity: m.identity.clone(),
            })
            .collect();
        self.send(connection_id, ServerEvent::RoomUsers { users });

        let joined = ServerEvent::UserJoined {
            connection_id,
            identity,
        };
        for member in snapshot.iter().filter(|m| m.connection_id != connection_id) {
            self.send(member.connection_id, joined.clone());
        }
        Ok(())
    }

    /// Forward a connection-setup payload verbatim to `to`, but only while
    /// sender and target are members of the same room. Envelopes addressed
    /// to a departed member are dropped silently; the sender's side gets
    /// torn down by the corresponding `member-left` instead.
    pub fn on_signal(
        &self,
        from: ConnectionId,
        room_id: RoomId,
        to: ConnectionId,
        payload: serde_json::Value,
    ) {
        let registry = self.inner.registry.lock();
        let sender_in_room = registry.room_of(&from) == Some(&room_id);
        let target_in_room = registry.room_of(&to) == Some(&room_id);
        if !sender_in_room || !target_in_room {
            debug!(%from, %to, %room_id, "dropping stale signal");
            return;
        }
        self.send(to, ServerEvent::VoiceSignal { from, payload });
    }

    /// Remove the connection from its room and tell the remaining members.
    /// Quiet when the connection was not in any room (leaving is
    /// idempotent).
    pub fn on_leave(&self, connection_id: ConnectionId) {
        let mut registry = self.inner.registry.lock();
        match registry.leave(connection_id) {
            Ok(departure) => {
                let left = ServerEvent::MemberLeft { connection_id };
                for member in &departure.remaining {
                    self.send(member.connection_id, left.clone());
                }
            }
            Err(RegistryError::NotFound(_)) => {
                debug!(%connection_id, "leave for a connection not in any room");
            }
            Err(e) => warn!(%connection_id, "leave failed: {e}"),
        }
    }

    /// Transport-level drop without an explicit `leave-room`.
    pub fn on_disconnect(&self, connection_id: ConnectionId) {
        debug!(%connection_id, "transport disconnected");
        self.on_leave(connection_id);
    }

    fn send(&self, to: ConnectionId, event: ServerEvent) {
        match self.inner.connections.get(&to) {
            Some(tx) => {
                if tx.send(event).is_err() {
                    warn!(%to, "connection channel closed, dropping event");
                }
            }
            None => debug!(%to, "no live connection for event, dropping"),
        }
    }
}
