//! A scripted speech-to-text adapter.
//!
//! Simulates a single-shot microphone from a fixed list of utterances, which
//! keeps voice flows fully deterministic: each capture produces the next
//! scripted line after a short delay, and an exhausted script behaves like a
//! silence timeout.

use super::{SpeechError, SpeechInput};
use crate::event::SessionEvent;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tracing::debug;

/// Speech-input adapter fed from a fixed script.
pub struct ScriptedRecognizer {
    lines: Arc<Mutex<VecDeque<String>>>,
    events: mpsc::Sender<SessionEvent>,
    capture_delay: Duration,
    capture_task: Mutex<Option<JoinHandle<()>>>,
}

impl ScriptedRecognizer {
    pub fn new(
        lines: Vec<String>,
        capture_delay: Duration,
        events: mpsc::Sender<SessionEvent>,
    ) -> Self {
        Self {
            lines: Arc::new(Mutex::new(lines.into())),
            events,
            capture_delay,
            capture_task: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SpeechInput for ScriptedRecognizer {
    /// Starts one capture.
    ///
    /// If a capture is already in flight it is restarted: the old capture task
    /// is aborted before the new one is spawned, so at most one capture runs
    /// and at most one `Recognized` is emitted per completed capture.
    async fn start(&self) -> Result<(), SpeechError> {
        let mut task = self.capture_task.lock().await;
        if let Some(handle) = task.take() {
            handle.abort();
            debug!("Restarting in-flight capture.");
        }

        let lines = self.lines.clone();
        let events = self.events.clone();
        let delay = self.capture_delay;
        *task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The script line is consumed only once the capture completes, so
            // an aborted capture does not lose its utterance.
            match lines.lock().await.pop_front() {
                Some(text) => {
                    debug!(transcript = %text, "Capture produced a final transcript.");
                    if events
                        .send(SessionEvent::Recognized { transcript: text })
                        .await
                        .is_err()
                    {
                        return;
                    }
                }
                None => debug!("Voice script exhausted; capture ends in silence."),
            }
            let _ = events.send(SessionEvent::CaptureEnded).await;
        }));
        Ok(())
    }

    async fn stop(&self) {
        if let Some(handle) = self.capture_task.lock().await.take() {
            handle.abort();
            debug!("Capture stopped.");
        }
    }
}
