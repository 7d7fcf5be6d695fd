use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
///
/// Every field has a default, so an empty environment yields a working
/// typed-only session.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    /// Speech rendering rate. 1.0 is normal speed.
    pub speech_rate: f32,
    /// Speech rendering pitch. 1.0 is normal pitch.
    pub speech_pitch: f32,
    /// Simulated capture latency of the scripted recognizer, in milliseconds.
    pub capture_delay_ms: u64,
    /// Path to a file of scripted voice utterances. Absent means the
    /// speech-input capability is unavailable.
    pub voice_script: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let speech_rate = parse_speech_scale("SPEECH_RATE", 1.0)?;
        let speech_pitch = parse_speech_scale("SPEECH_PITCH", 1.0)?;

        let capture_delay_ms = match std::env::var("CAPTURE_DELAY_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("CAPTURE_DELAY_MS".to_string(), e.to_string())
            })?,
            Err(_) => 400,
        };

        let voice_script = std::env::var("VOICE_SCRIPT").map(PathBuf::from).ok();

        Ok(Self {
            log_level,
            speech_rate,
            speech_pitch,
            capture_delay_ms,
            voice_script,
        })
    }
}

/// Parses a rate/pitch scale factor, which must be finite and above zero.
fn parse_speech_scale(var: &str, default: f32) -> Result<f32, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => {
            let value = raw
                .parse::<f32>()
                .map_err(|e| ConfigError::InvalidValue(var.to_string(), e.to_string()))?;
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue(
                    var.to_string(),
                    format!("'{}' must be a finite value above zero", raw),
                ));
            }
            Ok(value)
        }
        Err(_) => Ok(default),
    }
}
