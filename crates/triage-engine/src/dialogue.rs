//! Drives one interview turn against a single session.

use tracing::{debug, warn};

use triage_core::models::answer::Answer;
use triage_core::models::prompt::Prompt;
use triage_core::models::session::{DialogueSession, DialogueState, Flow, Role};
use triage_knowledge::SymptomCatalog;

use crate::error::EngineError;
use crate::states::{self, Transition};

/// Outcome of a submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    Prompt(Prompt),
    /// The interview is complete; the caller generates the report.
    Report,
}

/// Apply `answer` to the session's current state.
///
/// Logs the user's answer, and the assistant's reply when it is a prompt.
/// The report message is logged by the caller once it has been generated.
pub fn submit(session: &mut DialogueSession, answer: &Answer, catalog: &SymptomCatalog) -> Turn {
    session.record(Role::User, answer.to_string());

    let transition = if session.in_sub_interview() {
        states::sub_interview(session, answer, catalog)
    } else {
        match states::entry(session.current_state) {
            Some(entry) => (entry.advance)(session, answer, catalog),
            None => {
                warn!(session_id = %session.id, state = ?session.current_state, "unrecognized state, restarting interview");
                restart(session);
                let prompt = states::start_over();
                session.record(Role::Assistant, prompt.message.clone());
                return Turn::Prompt(prompt);
            }
        }
    };

    let prompt = match transition {
        Transition::To(next) => {
            debug!(session_id = %session.id, from = ?session.current_state, to = ?next, "advanced");
            session.current_state = next;
            session.state_history.push(next);
            entry_prompt(session, catalog)
        }
        Transition::Ask(prompt) => prompt,
        Transition::Report => return Turn::Report,
    };

    session.progress = prompt.progress;
    session.record(Role::Assistant, prompt.message.clone());
    Turn::Prompt(prompt)
}

/// Return to the previous state and re-show its prompt.
pub fn go_back(session: &mut DialogueSession, catalog: &SymptomCatalog) -> Result<Prompt, EngineError> {
    if session.state_history.len() < 2 {
        return Err(EngineError::NoPreviousState);
    }
    session.state_history.pop();
    let Some(&previous) = session.state_history.last() else {
        return Err(EngineError::NoPreviousState);
    };

    session.current_state = previous;
    session.current_flow = if previous == DialogueState::SymptomAssessment
        && session.symptom_specific_flow.is_some()
    {
        Flow::SymptomSpecific
    } else {
        Flow::Main
    };
    debug!(session_id = %session.id, state = ?previous, "went back");

    let prompt = entry_prompt(session, catalog);
    session.progress = prompt.progress;
    Ok(prompt)
}

/// The prompt for arriving at the session's current state.
pub fn entry_prompt(session: &DialogueSession, catalog: &SymptomCatalog) -> Prompt {
    match states::entry(session.current_state) {
        Some(entry) => (entry.prompt)(session, catalog),
        None => states::start_over(),
    }
}

/// Put the session back at the introduction, keeping its id and log.
fn restart(session: &mut DialogueSession) {
    session.current_state = DialogueState::Introduction;
    session.state_history = vec![DialogueState::Introduction];
    session.current_flow = Flow::Main;
    session.symptom_specific_flow = None;
    session.current_question = None;
    session.last_question_text = None;
    session.asked.reset();
    session.progress = 0;
}
