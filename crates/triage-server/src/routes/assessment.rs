use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use triage_core::models::prompt::{Prompt, Reply, SessionStart};
use triage_core::models::saved::SavedAssessment;
use triage_engine::QuickAssessmentRequest;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    session_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct StartNewRequest {
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    input: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct BackReply {
    message: &'static str,
    prompt: Prompt,
}

#[derive(Debug, Serialize)]
pub struct SaveReply {
    message: &'static str,
    assessment_id: Uuid,
}

pub async fn start_assessment(State(state): State<AppState>) -> Json<SessionStart> {
    Json(state.service.start_session().await)
}

pub async fn start_new_assessment(
    State(state): State<AppState>,
    Json(request): Json<StartNewRequest>,
) -> Json<SessionStart> {
    Json(
        state
            .service
            .start_new_session(request.session_id.as_deref())
            .await,
    )
}

pub async fn process_input(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<Reply>, ApiError> {
    let reply = state
        .service
        .submit_answer(&request.session_id, request.input)
        .await?;
    Ok(Json(reply))
}

pub async fn go_back(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<BackReply>, ApiError> {
    let prompt = state.service.go_back(&request.session_id).await?;
    Ok(Json(BackReply {
        message: "Let's go back to the previous question.",
        prompt,
    }))
}

pub async fn quick_assessment(
    State(state): State<AppState>,
    Json(request): Json<QuickAssessmentRequest>,
) -> Result<Json<Reply>, ApiError> {
    let reply = state.service.quick_assessment(request).await?;
    Ok(Json(reply))
}

pub async fn save_assessment(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<SaveReply>, ApiError> {
    let assessment_id = state.service.save_assessment(&request.session_id).await?;
    Ok(Json(SaveReply {
        message: "Assessment saved successfully",
        assessment_id,
    }))
}

pub async fn get_saved_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SavedAssessment>, ApiError> {
    let saved = state.service.get_saved_assessment(&id).await?;
    Ok(Json(saved))
}
