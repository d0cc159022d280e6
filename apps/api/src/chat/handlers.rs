//! Axum route handlers for server-side chat sessions.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::chat::run_turn;
use crate::chat::store::SessionSnapshot;
use crate::errors::AppError;
use crate::models::timestamp_now;
use crate::state::AppState;
use crate::validation::validate_chat_message;

#[derive(Debug, Deserialize)]
pub struct SessionMessageRequest {
    pub message: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSession {
    pub session_id: Uuid,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct SessionReply {
    pub response: String,
    pub timestamp: String,
}

/// POST /api/maria/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedSession>), AppError> {
    let snapshot = state.sessions.create().await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedSession {
            session_id: snapshot.session_id,
            created_at: snapshot.created_at,
        }),
    ))
}

/// GET /api/maria/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let Path(id) = path?;
    Ok(Json(state.sessions.get(id).await?))
}

/// POST /api/maria/sessions/:id/messages
///
/// 409 while the previous message is still awaiting a response.
pub async fn handle_session_message(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<SessionMessageRequest>, JsonRejection>,
) -> Result<Json<SessionReply>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let message = validate_chat_message(request.message.as_ref())?.to_string();

    let response = run_turn(&state.sessions, state.llm.clone(), id, message).await?;

    Ok(Json(SessionReply {
        response,
        timestamp: timestamp_now(),
    }))
}

/// DELETE /api/maria/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
