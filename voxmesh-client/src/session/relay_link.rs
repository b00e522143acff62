use async_trait::async_trait;
use voxmesh_core::ClientMessage;

/// Outbound half of the connection to the signaling relay (WebSocket or
/// whatever carries it). Implementations log their own delivery failures;
/// a dead relay link surfaces as the server closing the event stream.
#[async_trait]
pub trait RelayLink: Send + Sync {
    async fn send(&self, message: ClientMessage);
}
