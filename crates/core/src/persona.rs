//! The Persona Catalogue
//!
//! A persona is one of four fixed conversational styles. Each carries a
//! single canned perspective sentence that reply composition inserts
//! verbatim, so a persona that parses is always one that can speak.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string names no known persona.
///
/// Unknown personas are rejected here, at the parse boundary, rather than
/// producing a reply with a missing perspective clause downstream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown persona: '{0}'")]
pub struct UnknownPersona(pub String);

/// The four conversational styles an agent can adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persona {
    #[serde(rename = "optimistic strategist")]
    OptimisticStrategist,
    #[serde(rename = "curious analyst")]
    CuriousAnalyst,
    #[serde(rename = "calm skeptic")]
    CalmSkeptic,
    #[serde(rename = "empathetic storyteller")]
    EmpatheticStoryteller,
}

impl Persona {
    /// Every persona, in presentation order.
    pub const ALL: [Persona; 4] = [
        Persona::OptimisticStrategist,
        Persona::CuriousAnalyst,
        Persona::CalmSkeptic,
        Persona::EmpatheticStoryteller,
    ];

    /// The canonical lowercase form used in configuration and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::OptimisticStrategist => "optimistic strategist",
            Persona::CuriousAnalyst => "curious analyst",
            Persona::CalmSkeptic => "calm skeptic",
            Persona::EmpatheticStoryteller => "empathetic storyteller",
        }
    }

    /// The fixed perspective sentence this persona contributes to a reply.
    pub fn perspective(&self) -> &'static str {
        match self {
            Persona::OptimisticStrategist => {
                "I see momentum building, and I would invest in practical pilots now."
            }
            Persona::CuriousAnalyst => {
                "I think the evidence points to a few promising paths worth testing next."
            }
            Persona::CalmSkeptic => {
                "I remain cautiously optimistic, but I would watch for tradeoffs and blind spots."
            }
            Persona::EmpatheticStoryteller => {
                "I feel the human impact here is crucial, and I would center real stories."
            }
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Persona::CuriousAnalyst
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic strategist" => Ok(Persona::OptimisticStrategist),
            "curious analyst" => Ok(Persona::CuriousAnalyst),
            "calm skeptic" => Ok(Persona::CalmSkeptic),
            "empathetic storyteller" => Ok(Persona::EmpatheticStoryteller),
            _ => Err(UnknownPersona(s.trim().to_string())),
        }
    }
}
