use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid answer: {0}")]
    InvalidAnswer(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
