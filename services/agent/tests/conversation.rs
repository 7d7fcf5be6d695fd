//! End-to-end session flows through the public handle, using the real
//! simulated speech adapters under a paused tokio clock.

use soapbox_agent::{
    event::{SessionHandle, UiUpdate},
    session::SessionController,
    speech::{SpeechInput, paced::PacedSynthesizer, scripted::ScriptedRecognizer},
};
use soapbox_core::{
    persona::Persona,
    transcript::{Transcript, TranscriptEntry},
};
use std::{sync::Arc, time::Duration};
use tokio::{sync::mpsc, task::JoinHandle};

fn spawn_session(
    script: Option<&[&str]>,
) -> (SessionHandle, mpsc::Receiver<UiUpdate>, JoinHandle<Transcript>) {
    let (event_tx, event_rx) = mpsc::channel(32);
    let (ui_tx, ui_rx) = mpsc::channel(64);

    let synthesizer = Arc::new(PacedSynthesizer::new(event_tx.clone()));
    let recognizer: Option<Arc<dyn SpeechInput>> = script.map(|lines| {
        Arc::new(ScriptedRecognizer::new(
            lines.iter().map(|s| s.to_string()).collect(),
            Duration::from_millis(400),
            event_tx.clone(),
        )) as Arc<dyn SpeechInput>
    });

    let controller = SessionController::new(synthesizer, recognizer, ui_tx, 1.0, 1.0);
    let session = tokio::spawn(controller.run(event_rx));
    (SessionHandle::new(event_tx), ui_rx, session)
}

async fn next_update(ui_rx: &mut mpsc::Receiver<UiUpdate>) -> UiUpdate {
    ui_rx.recv().await.expect("ui channel closed unexpectedly")
}

fn status(text: &str, active: bool) -> UiUpdate {
    UiUpdate::Status {
        text: text.to_string(),
        active,
    }
}

const NOVA_REPLY: &str = "Nova here. Thanks for asking about \"What should we do?\" on climate policy. \
     I see momentum building, and I would invest in practical pilots now. \
     If you want, ask a follow-up or challenge my view.";

fn default_reply(question: &str) -> String {
    format!(
        "{} here. Thanks for asking about \"{}\". \
         I think the evidence points to a few promising paths worth testing next. \
         If you want, ask a follow-up or challenge my view.",
        "Agent", question
    )
}

#[tokio::test(start_paused = true)]
async fn typed_conversation_round_trip() {
    let (handle, mut ui_rx, session) = spawn_session(None);

    assert_eq!(next_update(&mut ui_rx).await, status("Agent idle", false));

    handle
        .configure("Nova", "climate policy", Persona::OptimisticStrategist)
        .await
        .unwrap();
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::system(
            "Nova created. Topic: climate policy. Persona: optimistic strategist."
        ))
    );
    assert_eq!(next_update(&mut ui_rx).await, status("Nova is ready", false));

    handle.ask("What should we do?").await.unwrap();
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::user("What should we do?"))
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::agent("Nova", NOVA_REPLY))
    );
    assert_eq!(next_update(&mut ui_rx).await, status("Nova is speaking", true));
    // Natural completion: the typed path never set the listening flag, so the
    // indicator settles inactive.
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Nova is listening", false)
    );

    handle.shutdown().await.unwrap();
    let transcript = session.await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.entries()[2].text, NOVA_REPLY);
}

#[tokio::test(start_paused = true)]
async fn voice_turn_flows_through_the_question_path() {
    let (handle, mut ui_rx, session) = spawn_session(Some(&["What should we do?"]));

    assert_eq!(next_update(&mut ui_rx).await, status("Agent idle", false));

    handle.start_listening().await.unwrap();
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Agent is listening", true)
    );

    // The scripted capture delivers its line, then the capture session ends
    // while the reply is still rendering.
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Agent is thinking", false)
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::user("What should we do?"))
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::agent(
            "Agent",
            default_reply("What should we do?")
        ))
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Agent is speaking", true)
    );
    assert_eq!(next_update(&mut ui_rx).await, status("Agent idle", false));
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Agent is listening", false)
    );

    handle.shutdown().await.unwrap();
    let transcript = session.await.unwrap();
    assert_eq!(transcript.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn missing_voice_capability_degrades_to_typed_input() {
    let (handle, mut ui_rx, session) = spawn_session(None);

    assert_eq!(next_update(&mut ui_rx).await, status("Agent idle", false));

    handle.start_listening().await.unwrap();
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Voice input is not available.", false)
    );

    // Typed input still works after the degraded start.
    handle.ask("test").await.unwrap();
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::user("test"))
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::agent("Agent", default_reply("test")))
    );

    handle.shutdown().await.unwrap();
    let transcript = session.await.unwrap();
    assert_eq!(transcript.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn second_question_supersedes_the_first_reply() {
    let (handle, mut ui_rx, session) = spawn_session(None);

    assert_eq!(next_update(&mut ui_rx).await, status("Agent idle", false));

    handle.ask("first question").await.unwrap();
    handle.ask("second question").await.unwrap();

    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::user("first question"))
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::agent(
            "Agent",
            default_reply("first question")
        ))
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Agent is speaking", true)
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::user("second question"))
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        UiUpdate::Transcript(TranscriptEntry::agent(
            "Agent",
            default_reply("second question")
        ))
    );
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Agent is speaking", true)
    );
    // Only the second utterance ever completes.
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Agent is listening", false)
    );

    handle.shutdown().await.unwrap();
    let transcript = session.await.unwrap();
    assert_eq!(transcript.len(), 4);
    assert_eq!(ui_rx.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn stop_listening_interrupts_the_capture() {
    let (handle, mut ui_rx, session) = spawn_session(Some(&["never delivered"]));

    assert_eq!(next_update(&mut ui_rx).await, status("Agent idle", false));

    handle.start_listening().await.unwrap();
    assert_eq!(
        next_update(&mut ui_rx).await,
        status("Agent is listening", true)
    );

    handle.stop_listening().await.unwrap();
    assert_eq!(next_update(&mut ui_rx).await, status("Agent idle", false));

    handle.shutdown().await.unwrap();
    let transcript = session.await.unwrap();
    assert!(transcript.is_empty());
    assert_eq!(ui_rx.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn blank_questions_leave_no_trace() {
    let (handle, mut ui_rx, session) = spawn_session(None);

    assert_eq!(next_update(&mut ui_rx).await, status("Agent idle", false));

    handle.ask("").await.unwrap();
    handle.ask("   ").await.unwrap();
    handle.shutdown().await.unwrap();

    let transcript = session.await.unwrap();
    assert!(transcript.is_empty());
    assert_eq!(ui_rx.recv().await, None);
}
