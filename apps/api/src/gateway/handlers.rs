//! Axum route handlers for the `/api/maria/*` assistant endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::gateway::{chat_reply, correct_essay, suggest_repertoire};
use crate::models::chat::parse_history;
use crate::models::essay::{CorrectionResult, EssaySubmission};
use crate::models::timestamp_now;
use crate::state::AppState;
use crate::validation::{
    js_length, validate_chat_message, validate_essay, validate_theme, MIN_CORRECTION_CHARS,
    MIN_REPORT_CHARS,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

// Fields are raw JSON so that missing, null and non-string values all reach
// validation and get the same 400 message.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<Value>,
    pub conversation_history: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    pub essay_text: Option<Value>,
    pub theme: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RepertoireRequest {
    pub theme: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResponse {
    pub correction: String,
    pub essay_length: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct RepertoireResponse {
    pub repertoire: String,
    pub theme: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    #[serde(flatten)]
    pub report: CorrectionResult,
    pub timestamp: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/maria/chat
///
/// Static capability listing; no side effects.
pub async fn handle_chat_info() -> Json<Value> {
    Json(json!({
        "message": "Maria está online e pronta para ajudar com sua redação do ENEM.",
        "endpoints": {
            "chat": "/api/maria/chat",
            "correction": "/api/maria/correction",
            "repertoire": "/api/maria/repertoire"
        }
    }))
}

/// POST /api/maria/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    let message = validate_chat_message(request.message.as_ref())?;
    let history = parse_history(request.conversation_history.as_ref());

    let response = chat_reply(state.llm.as_ref(), message, &history).await?;

    Ok(Json(ChatResponse {
        response,
        timestamp: timestamp_now(),
    }))
}

/// POST /api/maria/correction
///
/// Free-text correction. `essayLength` is the essay's length in UTF-16 units.
pub async fn handle_correction(
    State(state): State<AppState>,
    payload: Result<Json<CorrectionRequest>, JsonRejection>,
) -> Result<Json<CorrectionResponse>, AppError> {
    let Json(request) = payload?;
    let essay_text = validate_essay(request.essay_text.as_ref(), MIN_CORRECTION_CHARS)?;

    let correction = correct_essay(state.llm.as_ref(), essay_text).await?;

    Ok(Json(CorrectionResponse {
        correction,
        essay_length: js_length(essay_text),
        timestamp: timestamp_now(),
    }))
}

/// POST /api/maria/correction/report
///
/// Structured five-competency report from the configured scorer.
pub async fn handle_correction_report(
    State(state): State<AppState>,
    payload: Result<Json<CorrectionRequest>, JsonRejection>,
) -> Result<Json<ReportResponse>, AppError> {
    let Json(request) = payload?;
    let essay_text = validate_essay(request.essay_text.as_ref(), MIN_REPORT_CHARS)?;
    let theme = match request.theme {
        Some(Value::String(t)) if !t.trim().is_empty() => Some(t),
        _ => None,
    };

    let essay = EssaySubmission {
        text: essay_text.to_string(),
        theme,
    };
    let report = state.scorer.score(&essay).await?;

    Ok(Json(ReportResponse {
        report,
        timestamp: timestamp_now(),
    }))
}

/// POST /api/maria/repertoire
pub async fn handle_repertoire(
    State(state): State<AppState>,
    payload: Result<Json<RepertoireRequest>, JsonRejection>,
) -> Result<Json<RepertoireResponse>, AppError> {
    let Json(request) = payload?;
    let theme = validate_theme(request.theme.as_ref())?;

    let repertoire = suggest_repertoire(state.llm.as_ref(), theme).await?;

    Ok(Json(RepertoireResponse {
        repertoire,
        theme: theme.to_string(),
        timestamp: timestamp_now(),
    }))
}
