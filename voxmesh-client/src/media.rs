use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// The local capture device could not be opened. Fatal to room entry;
/// never retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("local capture device unavailable: {0}")]
pub struct MediaError(pub String);

/// Provider of the local microphone capture. Implemented outside this
/// crate (browser `getUserMedia`, an OS capture API, a test stub).
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire(&self) -> Result<Arc<dyn LocalMedia>, MediaError>;
}

/// A live local capture, shared read-only by every peer connection as its
/// outgoing track.
pub trait LocalMedia: Send + Sync {
    /// Enable or disable the outgoing audio track. Purely local; no
    /// signaling is involved.
    fn set_audio_enabled(&self, enabled: bool);

    /// Release the capture device. Only called once every peer link is
    /// done with the capture.
    fn stop(&self);
}
