use crate::model::connection::ConnectionId;
use crate::model::identity::Identity;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// One room member as seen on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub connection_id: ConnectionId,
    pub identity: Identity,
}

/// Messages a client sends to the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: RoomId, identity: Identity },

    /// Connection-setup blob for one specific remote member. The payload
    /// is opaque to the relay and forwarded verbatim.
    #[serde(rename_all = "camelCase")]
    VoiceSignal {
        room_id: RoomId,
        to: ConnectionId,
        payload: serde_json::Value,
    },

    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: RoomId },
}

/// Events the relay sends to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Membership snapshot sent to a connection right after its own join,
    /// in join order, excluding the joiner itself.
    RoomUsers { users: Vec<MemberInfo> },

    #[serde(rename_all = "camelCase")]
    UserJoined {
        connection_id: ConnectionId,
        identity: Identity,
    },

    VoiceSignal {
        from: ConnectionId,
        payload: serde_json::Value,
    },

    #[serde(rename_all = "camelCase")]
    MemberLeft { connection_id: ConnectionId },
}
