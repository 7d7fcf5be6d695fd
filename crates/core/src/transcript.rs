//! The conversation transcript: an append-only, ordered log of exchanges.

use serde::{Deserialize, Serialize};

/// Speaker label used for the human participant.
pub const USER_SPEAKER: &str = "You";
/// Speaker label used for configuration notices.
pub const SYSTEM_SPEAKER: &str = "System";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub text: String,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: USER_SPEAKER.to_string(),
            text: text.into(),
        }
    }

    pub fn agent(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: name.into(),
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            speaker: SYSTEM_SPEAKER.to_string(),
            text: text.into(),
        }
    }
}

/// Ordered record of everything said in a session.
///
/// Entries are only ever appended; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
