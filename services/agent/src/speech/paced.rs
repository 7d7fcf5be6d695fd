//! A paced text-to-speech adapter.
//!
//! Simulates audio rendering by sleeping for a duration proportional to the
//! utterance's word count, scaled by its rate, then reporting natural
//! completion. Cancellation aborts the rendering task, so a cancelled
//! utterance never completes.

use super::{SpeechError, SpeechOutput, Utterance};
use crate::event::SessionEvent;
use async_trait::async_trait;
use std::time::Duration;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tracing::debug;

/// Rendering time per word at rate 1.0.
const MS_PER_WORD: u64 = 180;

/// Speech-output adapter that renders utterances as timed silence.
pub struct PacedSynthesizer {
    events: mpsc::Sender<SessionEvent>,
    render_task: Mutex<Option<JoinHandle<()>>>,
}

impl PacedSynthesizer {
    pub fn new(events: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            events,
            render_task: Mutex::new(None),
        }
    }

    fn render_duration(utterance: &Utterance) -> Duration {
        let words = utterance.text.split_whitespace().count().max(1) as f64;
        Duration::from_millis((words * MS_PER_WORD as f64 / utterance.rate as f64) as u64)
    }
}

#[async_trait]
impl SpeechOutput for PacedSynthesizer {
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let mut task = self.render_task.lock().await;
        if let Some(handle) = task.take() {
            handle.abort();
            debug!("Superseded in-flight utterance.");
        }

        let duration = Self::render_duration(&utterance);
        let events = self.events.clone();
        debug!(
            utterance = utterance.id,
            rate = utterance.rate,
            pitch = utterance.pitch,
            ?duration,
            "Rendering utterance."
        );
        *task = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = events
                .send(SessionEvent::SpeakingFinished {
                    utterance: utterance.id,
                })
                .await;
        }));
        Ok(())
    }

    async fn cancel(&self) {
        if let Some(handle) = self.render_task.lock().await.take() {
            handle.abort();
            debug!("Cancelled in-flight utterance.");
        }
    }
}
