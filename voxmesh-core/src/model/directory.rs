use crate::model::identity::Identity;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// Catalog entry for a named room. Live membership is tracked separately
/// by the registry; this is only the room's descriptive record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub id: RoomId,
    pub name: String,
    pub created_by: Identity,
    /// Unix milliseconds.
    pub created_at: u64,
}
