use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use triage_engine::EngineError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Backtracking past the first state. Carries a user-facing message
    /// alongside the machine-readable code.
    NoPreviousState,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody { error: msg, message: None }),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody { error: msg, message: None }),
            ApiError::NoPreviousState => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "no_previous_state".to_string(),
                    message: Some(
                        "Cannot go back further. You're at the beginning of the conversation."
                            .to_string(),
                    ),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidSession(id) => {
                tracing::debug!(session_id = %id, "rejected unknown session");
                ApiError::BadRequest("Invalid session".to_string())
            }
            EngineError::NoPreviousState => ApiError::NoPreviousState,
            EngineError::MissingField(field) => {
                ApiError::BadRequest(format!("Missing required parameters: {field}"))
            }
            EngineError::AssessmentNotFound(id) => {
                ApiError::NotFound(format!("saved assessment not found: {id}"))
            }
            EngineError::Core(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}
