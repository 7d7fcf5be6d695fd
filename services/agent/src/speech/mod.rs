//! Speech adapter seams for the session controller.
//!
//! Both adapters receive a clone of the session's event sender at construction
//! and report back exclusively by sending [`SessionEvent`]s, so the controller
//! stays the single place where session state changes.
//!
//! [`SessionEvent`]: crate::event::SessionEvent

pub mod paced;
pub mod scripted;

use async_trait::async_trait;

/// Error reported by a speech adapter.
///
/// The code is short and machine-ish ("network", "not-allowed") and is shown
/// verbatim in status text when a capture fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}")]
pub struct SpeechError {
    pub code: String,
}

impl SpeechError {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// A single unit of speech output handed to the [`SpeechOutput`] adapter.
///
/// Ids come from the controller's monotonic counter; the completion event
/// carries the id back so completions of superseded utterances can be ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: u64,
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
}

/// Contract for a speech-to-text capability.
///
/// This is an optional collaborator: the controller holds it as
/// `Option<Arc<dyn SpeechInput>>` and degrades to typed-only input when it is
/// absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechInput: Send + Sync {
    /// Begins capturing one utterance.
    ///
    /// A successful capture emits exactly one `Recognized` event with the
    /// final transcript, followed by `CaptureEnded`; a capture that ends in
    /// silence emits only `CaptureEnded`. Interim results are not surfaced.
    /// Calling `start` while a capture is in flight restarts the capture.
    async fn start(&self) -> Result<(), SpeechError>;

    /// Cancels any in-flight capture. Idempotent; safe when not capturing.
    async fn stop(&self);
}

/// Contract for a text-to-speech capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Begins rendering `utterance`, superseding any in-flight rendering.
    ///
    /// At most one utterance renders at a time; the newest request wins.
    /// `SpeakingFinished` is emitted only when rendering completes naturally.
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;

    /// Stops any in-progress rendering immediately. Safe when idle. No
    /// completion is emitted for a cancelled utterance.
    async fn cancel(&self);
}
