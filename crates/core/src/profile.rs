//! The Agent Profile
//!
//! Session configuration for one agent: its display name, an optional topic
//! of expertise, and the persona that flavors its replies. A profile is
//! replaced wholesale on reconfiguration, never merged.

use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// Name used when the configured name is empty after trimming.
pub const DEFAULT_AGENT_NAME: &str = "Agent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub topic: String,
    pub persona: Persona,
}

impl AgentProfile {
    /// Builds a profile from raw form input.
    ///
    /// Name and topic are trimmed; an empty name falls back to
    /// [`DEFAULT_AGENT_NAME`]. There is no failure path.
    pub fn new(name: &str, topic: &str, persona: Persona) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                DEFAULT_AGENT_NAME.to_string()
            } else {
                name.to_string()
            },
            topic: topic.trim().to_string(),
            persona,
        }
    }

    /// The system notice announcing this profile in the transcript.
    pub fn announcement(&self) -> String {
        format!(
            "{} created. Topic: {}. Persona: {}.",
            self.name, self.topic, self.persona
        )
    }
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            topic: String::new(),
            persona: Persona::default(),
        }
    }
}
