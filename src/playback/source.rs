//! The playable-resource abstraction.
//!
//! The coordinator treats audio resources as opaque: anything that can
//! attempt to start playing and can be halted qualifies. In the web
//! front-end the implementation wraps a base64 data-URI audio element; in
//! tests it is a scripted mock.
//!
//! Once registered, a source is owned exclusively by the coordinator —
//! callers must not start or halt it directly while the registration is
//! live.

use async_trait::async_trait;
use thiserror::Error;

/// Why a playback-start attempt did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The start attempt was interrupted by a competing request. The
    /// coordinator induces these itself when pre-empting and treats them
    /// as success, not failure.
    #[error("playback start aborted")]
    Aborted,
    /// The resource could not begin playing.
    #[error("playback start failed: {0}")]
    Failed(String),
}

/// A single playable audio resource.
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Begin playback from the current position.
    ///
    /// Resolves once audio is actually playing, or fails with
    /// [`SourceError::Aborted`] when halted mid-start and
    /// [`SourceError::Failed`] for genuine resource errors.
    async fn start(&self) -> Result<(), SourceError>;

    /// Pause playback and rewind to the beginning. Infallible and
    /// idempotent; halting a source that is not playing is a no-op.
    fn halt(&self);
}
