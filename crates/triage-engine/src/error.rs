use thiserror::Error;

use triage_core::error::CoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid session: {0}")]
    InvalidSession(String),

    #[error("cannot go back further: already at the beginning of the conversation")]
    NoPreviousState,

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("saved assessment not found: {0}")]
    AssessmentNotFound(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
