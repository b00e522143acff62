use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use voxmesh_core::{ConnectionId, Identity, RoomId};

/// One connection's presence in a room. Owned exclusively by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub connection_id: ConnectionId,
    pub identity: Identity,
    pub room_id: RoomId,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A connection may be a member of at most one room; callers must
    /// leave before joining again.
    #[error("connection {connection_id} is already in room {room_id}")]
    AlreadyInRoom {
        connection_id: ConnectionId,
        room_id: RoomId,
    },

    #[error("connection {0} is not in any room")]
    NotFound(ConnectionId),
}

/// Result of a successful leave: which room was left and who is still in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: RoomId,
    pub remaining: Vec<MemberEntry>,
}

/// The bookkeeping itself, free of locking, so the relay can run a whole
/// mutate-then-notify sequence under a single guard.
#[derive(Default)]
pub struct RegistryState {
    rooms: HashMap<RoomId, Vec<MemberEntry>>,
    by_connection: HashMap<ConnectionId, RoomId>,
}

impl RegistryState {
    /// Add a member and return the full member list of the room, caller
    /// included, captured atomically with the insertion. Member order is
    /// join order.
    pub fn join(
        &mut self,
        connection_id: ConnectionId,
        identity: Identity,
        room_id: RoomId,
    ) -> Result<Vec<MemberEntry>, RegistryError> {
        if let Some(existing) = self.by_connection.get(&connection_id) {
            return Err(RegistryError::AlreadyInRoom {
                connection_id,
                room_id: existing.clone(),
            });
        }

        let members = self.rooms.entry(room_id.clone()).or_default();
        members.push(MemberEntry {
            connection_id,
            identity,
            room_id: room_id.clone(),
        });
        self.by_connection.insert(connection_id, room_id);
        Ok(members.clone())
    }

    /// Remove the connection from whichever room holds it. Rooms are
    /// dropped when their last member leaves.
    pub fn leave(&mut self, connection_id: ConnectionId) -> Result<Departure, RegistryError> {
        let room_id = self
            .by_connection
            .remove(&connection_id)
            .ok_or(RegistryError::NotFound(connection_id))?;

        let remaining = match self.rooms.get_mut(&room_id) {
            Some(members) => {
                members.retain(|m| m.connection_id != connection_id);
                members.clone()
            }
            None => Vec::new(),
        };
        if remaining.is_empty() {
            self.rooms.remove(&room_id);
        }
        Ok(Departure { room_id, remaining })
    }

    pub fn members_of(&self, room_id: &RoomId) -> Vec<MemberEntry> {
        self.rooms.get(room_id).cloned().unwrap_or_default()
    }

    pub fn room_of(&self, connection_id: &ConnectionId) -> Option<&RoomId> {
        self.by_connection.get(connection_id)
    }

    pub fn is_occupied(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }
}

/// Authoritative room membership table. All mutations go through one lock;
/// critical sections are pure in-memory work and are never held across an
/// await point.
#[derive(Default)]
pub struct RoomRegistry {
    state: Mutex<RegistryState>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`RegistryState::join`].
    pub fn join(
        &self,
        connection_id: ConnectionId,
        identity: Identity,
        room_id: RoomId,
    ) -> Result<Vec<MemberEntry>, RegistryError> {
        self.lock().join(connection_id, identity, room_id)
    }

    /// Idempotent: leaving twice reports `NotFound` rather than failing
    /// loudly.
    pub fn leave(&self, connection_id: ConnectionId) -> Result<Departure, RegistryError> {
        self.lock().leave(connection_id)
    }

    /// A dropped transport connection is a leave, whether or not the
    /// client managed to say goodbye.
    pub fn disconnect(&self, connection_id: ConnectionId) -> Result<Departure, RegistryError> {
        self.lock().leave(connection_id)
    }

    pub fn members_of(&self, room_id: &RoomId) -> Vec<MemberEntry> {
        self.lock().members_of(room_id)
    }

    pub fn is_occupied(&self, room_id: &RoomId) -> bool {
        self.lock().is_occupied(room_id)
    }
}
