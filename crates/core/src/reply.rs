//! Reply Composition
//!
//! Builds the agent's canned opinion for a question. This is a pure function
//! of the profile and the question text; the same inputs always produce the
//! same reply, which is the one property the rest of the system leans on.

use crate::profile::AgentProfile;

/// Composes the agent's reply to `question`.
///
/// The reply quotes the question, appends `" on <topic>"` only when the
/// profile has a topic, inserts the persona's fixed perspective sentence
/// verbatim, and closes with an invitation to continue. The question is
/// interpolated exactly as given; rejecting blank input is the caller's job.
pub fn compose_reply(profile: &AgentProfile, question: &str) -> String {
    let topic_clause = if profile.topic.is_empty() {
        String::new()
    } else {
        format!(" on {}", profile.topic)
    };

    format!(
        "{} here. Thanks for asking about \"{}\"{}. {} If you want, ask a follow-up or challenge my view.",
        profile.name,
        question,
        topic_clause,
        profile.persona.perspective()
    )
}
