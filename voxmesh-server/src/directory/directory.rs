use crate::registry::RoomRegistry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};
use voxmesh_core::{Identity, RoomId, RoomInfo};

/// Catalog of named rooms, separate from the live membership registry.
/// Creating an entry here reserves a room code; joining is still implicit
/// through the relay.
pub struct RoomDirectory {
    registry: Arc<RoomRegistry>,
    rooms: Mutex<HashMap<RoomId, RoomInfo>>,
}

impl RoomDirectory {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self {
            registry,
            rooms: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RoomId, RoomInfo>> {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a named room, regenerating the code while it collides with
    /// an existing directory entry or a currently occupied ad-hoc room.
    pub fn create(&self, name: String, created_by: Identity) -> RoomInfo {
        let mut rooms = self.lock();
        let id = loop {
            let id = RoomId::generate();
            if !rooms.contains_key(&id) && !self.registry.is_occupied(&id) {
                break id;
            }
        };
        let info = RoomInfo {
            id: id.clone(),
            name,
            created_by,
            created_at: unix_millis(),
        };
        rooms.insert(id, info.clone());
        info
    }

    pub fn get(&self, id: &RoomId) -> Option<RoomInfo> {
        self.lock().get(id).cloned()
    }

    pub fn list(&self) -> Vec<RoomInfo> {
        let mut rooms: Vec<RoomInfo> = self.lock().values().cloned().collect();
        rooms.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        rooms
    }

    /// Rooms the identity created or is currently sitting in.
    pub fn list_for(&self, identity: &Identity) -> Vec<RoomInfo> {
        self.list()
            .into_iter()
            .filter(|info| {
                info.created_by == *identity
                    || self
                        .registry
                        .members_of(&info.id)
                        .iter()
                        .any(|m| m.identity == *identity)
            })
            .collect()
    }

    pub fn remove(&self, id: &RoomId) -> bool {
        self.lock().remove(id).is_some()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
