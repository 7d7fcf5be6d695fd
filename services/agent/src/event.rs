//! Defines the event model that drives the session controller.
//!
//! The controller consumes [`SessionEvent`]s from a single queue and publishes
//! [`UiUpdate`]s for the rendering layer. Everything that happens in a session,
//! whether the user typed it or a speech adapter reported it, arrives as an
//! event on that one queue.

use soapbox_core::persona::Persona;
use soapbox_core::transcript::TranscriptEntry;
use tokio::sync::mpsc;

/// Events consumed by the session controller.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Replaces the agent's profile wholesale.
    Configure {
        name: String,
        topic: String,
        persona: Persona,
    },
    /// A question from the user. Typed and voice input both arrive here.
    Question { text: String },
    /// Begin capturing one spoken utterance.
    StartListening,
    /// Stop capturing and return the session to idle.
    StopListening,
    /// The speech-input adapter produced a final transcript.
    Recognized { transcript: String },
    /// The speech-input capture session concluded, normally or via silence.
    CaptureEnded,
    /// The speech-input adapter reported an error code.
    CaptureFailed { code: String },
    /// The speech-output adapter finished rendering an utterance naturally.
    /// Never emitted for a cancelled utterance.
    SpeakingFinished { utterance: u64 },
    /// Ends the session loop; the controller returns its transcript.
    Shutdown,
}

/// Updates published by the controller for the UI collaborator to render.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// The single-line activity indicator.
    Status { text: String, active: bool },
    /// A new transcript entry, in display order.
    Transcript(TranscriptEntry),
}

/// Error returned when the session's event queue is gone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Session is no longer running")]
pub struct SessionClosed;

/// A clonable handle for driving a running session.
///
/// One method per user-originated operation; adapter events are sent by the
/// adapters themselves on their own clone of the event sender.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionEvent>,
}

impl SessionHandle {
    pub fn new(tx: mpsc::Sender<SessionEvent>) -> Self {
        Self { tx }
    }

    /// Replaces the session configuration.
    pub async fn configure(
        &self,
        name: &str,
        topic: &str,
        persona: Persona,
    ) -> Result<(), SessionClosed> {
        self.send(SessionEvent::Configure {
            name: name.to_string(),
            topic: topic.to_string(),
            persona,
        })
        .await
    }

    /// Submits a typed question.
    pub async fn ask(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
        self.send(SessionEvent::Question { text: text.into() }).await
    }

    /// Requests that the session begin capturing one spoken utterance.
    pub async fn start_listening(&self) -> Result<(), SessionClosed> {
        self.send(SessionEvent::StartListening).await
    }

    /// Requests that the session stop capturing and go idle.
    pub async fn stop_listening(&self) -> Result<(), SessionClosed> {
        self.send(SessionEvent::StopListening).await
    }

    /// Ends the session.
    pub async fn shutdown(&self) -> Result<(), SessionClosed> {
        self.send(SessionEvent::Shutdown).await
    }

    async fn send(&self, event: SessionEvent) -> Result<(), SessionClosed> {
        self.tx.send(event).await.map_err(|_| SessionClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handle_forwards_events_in_order() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle = SessionHandle::new(tx);

        handle
            .configure("Nova", "climate policy", Persona::OptimisticStrategist)
            .await
            .unwrap();
        handle.ask("What should we do?").await.unwrap();
        handle.stop_listening().await.unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            SessionEvent::Configure { ref name, .. } if name == "Nova"
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            SessionEvent::Question { ref text } if text == "What should we do?"
        ));
        assert!(matches!(rx.recv().await.unwrap(), SessionEvent::StopListening));
    }

    #[tokio::test]
    async fn handle_reports_a_closed_session() {
        let (tx, rx) = mpsc::channel(1);
        let handle = SessionHandle::new(tx);
        drop(rx);

        assert_eq!(handle.ask("anyone there?").await, Err(SessionClosed));
    }
}
