//! The agent session controller.
//!
//! One controller task owns all mutable session state: the agent profile, the
//! transcript, the listening flag, and the id of the utterance currently being
//! rendered. Everything reaches it as a [`SessionEvent`] on a single queue, so
//! no locking discipline is needed anywhere in the session.

use crate::event::{SessionEvent, UiUpdate};
use crate::speech::{SpeechInput, SpeechOutput, Utterance};
use soapbox_core::{
    persona::Persona,
    profile::AgentProfile,
    reply::compose_reply,
    transcript::{Transcript, TranscriptEntry},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Drives one conversation session.
///
/// The speech-input adapter is optional; without it the session degrades to
/// typed-only input and reports the missing capability through status text.
pub struct SessionController {
    profile: AgentProfile,
    transcript: Transcript,
    is_listening: bool,
    speaking: Option<u64>,
    next_utterance: u64,
    synthesizer: Arc<dyn SpeechOutput>,
    recognizer: Option<Arc<dyn SpeechInput>>,
    ui_tx: mpsc::Sender<UiUpdate>,
    speech_rate: f32,
    speech_pitch: f32,
}

impl SessionController {
    pub fn new(
        synthesizer: Arc<dyn SpeechOutput>,
        recognizer: Option<Arc<dyn SpeechInput>>,
        ui_tx: mpsc::Sender<UiUpdate>,
        speech_rate: f32,
        speech_pitch: f32,
    ) -> Self {
        Self {
            profile: AgentProfile::default(),
            transcript: Transcript::new(),
            is_listening: false,
            speaking: None,
            next_utterance: 0,
            synthesizer,
            recognizer,
            ui_tx,
            speech_rate,
            speech_pitch,
        }
    }

    /// The main event loop for the session.
    ///
    /// Runs until the queue closes or a `Shutdown` event arrives, then stops
    /// both adapters and returns the finished transcript.
    pub async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) -> Transcript {
        self.update_status("Agent idle", false).await;
        info!(voice_input = self.recognizer.is_some(), "Session ready.");

        while let Some(event) = events.recv().await {
            if matches!(event, SessionEvent::Shutdown) {
                info!("Session shutting down.");
                break;
            }
            self.handle_event(event).await;
        }

        // Clean up adapter tasks on exit.
        if let Some(recognizer) = &self.recognizer {
            recognizer.stop().await;
        }
        self.synthesizer.cancel().await;
        info!(entries = self.transcript.len(), "Session finished.");
        self.transcript
    }

    async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Configure {
                name,
                topic,
                persona,
            } => self.configure(&name, &topic, persona).await,
            SessionEvent::Question { text } => self.handle_question(&text).await,
            SessionEvent::StartListening => self.start_listening().await,
            SessionEvent::StopListening => self.stop_listening().await,
            SessionEvent::Recognized { transcript } => {
                self.is_listening = false;
                self.update_status(format!("{} is thinking", self.profile.name), false)
                    .await;
                self.handle_question(&transcript).await;
            }
            SessionEvent::CaptureEnded => {
                debug!("Capture session ended.");
                self.is_listening = false;
                self.update_status("Agent idle", false).await;
            }
            SessionEvent::CaptureFailed { code } => {
                warn!(%code, "Speech capture failed.");
                self.is_listening = false;
                self.update_status(format!("Voice input error: {}", code), false)
                    .await;
            }
            SessionEvent::SpeakingFinished { utterance } => {
                self.speaking_finished(utterance).await
            }
            SessionEvent::Shutdown => {}
        }
    }

    /// Replaces the session configuration wholesale.
    async fn configure(&mut self, name: &str, topic: &str, persona: Persona) {
        self.profile = AgentProfile::new(name, topic, persona);
        info!(
            agent = %self.profile.name,
            topic = %self.profile.topic,
            persona = %self.profile.persona,
            "Session reconfigured."
        );
        self.push_entry(TranscriptEntry::system(self.profile.announcement()))
            .await;
        self.update_status(format!("{} is ready", self.profile.name), false)
            .await;
    }

    /// Handles one question, typed or recognized.
    ///
    /// Blank input is silently ignored. Otherwise the question and the
    /// composed reply are appended to the transcript and the reply is spoken.
    async fn handle_question(&mut self, text: &str) {
        let question = text.trim();
        if question.is_empty() {
            debug!("Ignoring blank question.");
            return;
        }

        self.push_entry(TranscriptEntry::user(question)).await;
        let reply = compose_reply(&self.profile, question);
        self.push_entry(TranscriptEntry::agent(
            self.profile.name.clone(),
            reply.clone(),
        ))
        .await;
        self.speak(reply).await;
    }

    /// Begins rendering `text`, superseding any in-flight utterance.
    async fn speak(&mut self, text: String) {
        self.synthesizer.cancel().await;
        let id = self.next_utterance;
        self.next_utterance += 1;
        self.speaking = Some(id);
        self.update_status(format!("{} is speaking", self.profile.name), true)
            .await;

        let utterance = Utterance {
            id,
            text,
            rate: self.speech_rate,
            pitch: self.speech_pitch,
        };
        if let Err(e) = self.synthesizer.speak(utterance).await {
            warn!(code = %e.code, "Failed to start speech rendering.");
            self.speaking = None;
        }
    }

    /// Reacts to the natural completion of an utterance.
    ///
    /// Completions of superseded utterances carry a stale id and are dropped;
    /// only the utterance currently in the slot settles the status. The status
    /// wording stays "is listening" either way; the active indicator alone
    /// reflects whether a capture is actually running.
    async fn speaking_finished(&mut self, utterance: u64) {
        if self.speaking != Some(utterance) {
            debug!(utterance, "Ignoring completion of a superseded utterance.");
            return;
        }
        self.speaking = None;
        self.update_status(
            format!("{} is listening", self.profile.name),
            self.is_listening,
        )
        .await;
    }

    /// Begins one speech capture, if the capability is present.
    async fn start_listening(&mut self) {
        let Some(recognizer) = self.recognizer.clone() else {
            self.update_status("Voice input is not available.", false).await;
            return;
        };

        self.synthesizer.cancel().await;
        self.speaking = None;
        self.is_listening = true;
        self.update_status(format!("{} is listening", self.profile.name), true)
            .await;

        if let Err(e) = recognizer.start().await {
            warn!(code = %e.code, "Speech capture failed to start.");
            self.is_listening = false;
            self.update_status(format!("Voice input error: {}", e.code), false)
                .await;
        }
    }

    /// Stops capture and output and returns the session to idle.
    async fn stop_listening(&mut self) {
        self.synthesizer.cancel().await;
        self.speaking = None;
        if let Some(recognizer) = &self.recognizer {
            recognizer.stop().await;
        }
        self.is_listening = false;
        self.update_status("Agent idle", false).await;
    }

    async fn push_entry(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry.clone());
        if self.ui_tx.send(UiUpdate::Transcript(entry)).await.is_err() {
            warn!("Failed to push transcript entry: receiver dropped.");
        }
    }

    async fn update_status(&self, text: impl Into<String>, active: bool) {
        let update = UiUpdate::Status {
            text: text.into(),
            active,
        };
        if self.ui_tx.send(update).await.is_err() {
            warn!("Failed to push status update: receiver dropped.");
        }
    }
}
