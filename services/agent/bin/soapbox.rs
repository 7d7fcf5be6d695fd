//! Main Entrypoint for the Soapbox Console Demo
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment and CLI flags.
//! 2. Initializing logging.
//! 3. Building the speech adapters (voice input only when a script is configured).
//! 4. Spawning the session controller and a UI renderer task.
//! 5. Reading commands and questions from stdin until quit or Ctrl+C.

use anyhow::Context;
use clap::Parser;
use soapbox_agent::{
    config::Config,
    event::{SessionHandle, UiUpdate},
    session::SessionController,
    speech::{SpeechInput, paced::PacedSynthesizer, scripted::ScriptedRecognizer},
};
use soapbox_core::persona::Persona;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{Instrument, error, info};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "soapbox", about = "Console demo for the soapbox opinion agent")]
struct Cli {
    /// Speech rendering rate (overrides SPEECH_RATE).
    #[arg(long)]
    rate: Option<f32>,
    /// Speech rendering pitch (overrides SPEECH_PITCH).
    #[arg(long)]
    pitch: Option<f32>,
    /// File of scripted voice utterances (overrides VOICE_SCRIPT).
    #[arg(long)]
    voice_script: Option<PathBuf>,
}

/// Reads the scripted voice utterances, one per line, skipping blanks.
fn load_voice_script(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read voice script at {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn print_help() {
    println!("Commands:");
    println!("  /agent <name> | <topic> | <persona>   configure the agent");
    println!("  /listen                               capture one spoken utterance");
    println!("  /stop                                 stop listening");
    println!("  /quit                                 end the session");
    println!("Anything else is asked as a question.");
    let personas: Vec<&str> = Persona::ALL.iter().map(|p| p.as_str()).collect();
    println!("Personas: {}", personas.join(", "));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let speech_rate = cli.rate.unwrap_or(config.speech_rate);
    let speech_pitch = cli.pitch.unwrap_or(config.speech_pitch);
    if !(speech_rate.is_finite() && speech_rate > 0.0)
        || !(speech_pitch.is_finite() && speech_pitch > 0.0)
    {
        anyhow::bail!("--rate and --pitch must be finite values above zero");
    }

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Building session...");

    // --- 3. Build Speech Adapters ---
    let (event_tx, event_rx) = mpsc::channel(32);
    let (ui_tx, mut ui_rx) = mpsc::channel(32);

    let synthesizer = Arc::new(PacedSynthesizer::new(event_tx.clone()));
    let voice_script = cli.voice_script.or(config.voice_script);
    let recognizer: Option<Arc<dyn SpeechInput>> = match &voice_script {
        Some(path) => {
            let lines = load_voice_script(path)?;
            info!(script = %path.display(), utterances = lines.len(), "Voice input enabled.");
            Some(Arc::new(ScriptedRecognizer::new(
                lines,
                Duration::from_millis(config.capture_delay_ms),
                event_tx.clone(),
            )))
        }
        None => {
            info!("No voice script configured; voice input disabled.");
            None
        }
    };

    // --- 4. Spawn the Session and Renderer ---
    let controller =
        SessionController::new(synthesizer, recognizer, ui_tx, speech_rate, speech_pitch);
    let session_id = Uuid::new_v4();
    let session_span = tracing::info_span!("agent_session", %session_id);
    let session = tokio::spawn(controller.run(event_rx).instrument(session_span));

    let renderer = tokio::spawn(async move {
        while let Some(update) = ui_rx.recv().await {
            match update {
                UiUpdate::Status { text, active } => {
                    if active {
                        println!("-- {} *", text);
                    } else {
                        println!("-- {}", text);
                    }
                }
                UiUpdate::Transcript(entry) => println!("{}: {}", entry.speaker, entry.text),
            }
        }
    });

    // --- 5. Read Commands from Stdin ---
    let handle = SessionHandle::new(event_tx);
    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal. Shutting down gracefully...");
                break;
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read from stdin: {}", e);
                        break;
                    }
                };
                if dispatch_line(&handle, line.trim()).await.is_break() {
                    break;
                }
            }
        }
    }

    handle.shutdown().await.ok();
    let transcript = session.await.context("Session task failed")?;
    let _ = renderer.await;
    info!(entries = transcript.len(), "Session ended.");
    Ok(())
}

/// Interprets one stdin line as a command or a question.
async fn dispatch_line(
    handle: &SessionHandle,
    line: &str,
) -> std::ops::ControlFlow<()> {
    use std::ops::ControlFlow;

    let sent = if line == "/quit" {
        return ControlFlow::Break(());
    } else if line == "/listen" {
        handle.start_listening().await
    } else if line == "/stop" {
        handle.stop_listening().await
    } else if let Some(rest) = line.strip_prefix("/agent") {
        let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
        let &[name, topic, persona] = parts.as_slice() else {
            println!("Usage: /agent <name> | <topic> | <persona>");
            return ControlFlow::Continue(());
        };
        match persona.parse::<Persona>() {
            Ok(persona) => handle.configure(name, topic, persona).await,
            Err(e) => {
                let personas: Vec<&str> = Persona::ALL.iter().map(|p| p.as_str()).collect();
                println!("{}. Try one of: {}", e, personas.join(", "));
                return ControlFlow::Continue(());
            }
        }
    } else if line.is_empty() {
        return ControlFlow::Continue(());
    } else {
        handle.ask(line).await
    };

    if sent.is_err() {
        error!("Session is no longer running.");
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}
