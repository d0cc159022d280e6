//! Correction gateway — the three outbound operations of the assistant.
//!
//! Each operation builds a fixed instruction, makes one logical call through the
//! injected `TextGenerator`, and returns the raw text. Empty output is replaced by
//! a fixed fallback; any failure becomes `AppError::Gateway`.

pub mod handlers;
pub mod prompts;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::chat::{tail, ChatMessage};

use prompts::{
    CHAT_FAILED, CHAT_FALLBACK, CORRECTION_FAILED, CORRECTION_FALLBACK, CORRECTION_PROMPT_TEMPLATE,
    MARIA_SYSTEM, REPERTOIRE_FAILED, REPERTOIRE_FALLBACK, REPERTOIRE_PROMPT_TEMPLATE,
};

/// How many prior messages are forwarded as conversational context.
pub const MAX_CONTEXT_MESSAGES: usize = 10;

/// Answers a chat message given the prior conversation.
/// Only the last `MAX_CONTEXT_MESSAGES` of `history` are forwarded.
pub async fn chat_reply(
    generator: &dyn TextGenerator,
    message: &str,
    history: &[ChatMessage],
) -> Result<String, AppError> {
    let context = tail(history, MAX_CONTEXT_MESSAGES);
    let mut transcript = Vec::with_capacity(context.len() + 1);
    transcript.extend_from_slice(context);
    transcript.push(ChatMessage::user(message));

    info!(
        "Chat request: message_len={}, context_messages={}",
        message.len(),
        context.len()
    );

    let text = generator
        .generate(MARIA_SYSTEM, &transcript)
        .await
        .map_err(|e| gateway_error(CHAT_FAILED, e))?;

    Ok(or_fallback(text, CHAT_FALLBACK))
}

/// Requests a free-text correction of `essay_text`.
pub async fn correct_essay(generator: &dyn TextGenerator, essay_text: &str) -> Result<String, AppError> {
    let prompt = CORRECTION_PROMPT_TEMPLATE.replace("{essay_text}", essay_text);
    info!("Correction request: essay_len={}", essay_text.len());

    let text = generator
        .generate(MARIA_SYSTEM, &[ChatMessage::user(prompt)])
        .await
        .map_err(|e| gateway_error(CORRECTION_FAILED, e))?;

    Ok(or_fallback(text, CORRECTION_FALLBACK))
}

/// Requests repertoire suggestions for an essay theme.
pub async fn suggest_repertoire(generator: &dyn TextGenerator, theme: &str) -> Result<String, AppError> {
    let prompt = REPERTOIRE_PROMPT_TEMPLATE.replace("{theme}", theme);
    info!("Repertoire request: theme_len={}", theme.len());

    let text = generator
        .generate(MARIA_SYSTEM, &[ChatMessage::user(prompt)])
        .await
        .map_err(|e| gateway_error(REPERTOIRE_FAILED, e))?;

    Ok(or_fallback(text, REPERTOIRE_FALLBACK))
}

fn or_fallback(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        warn!("Model returned empty content; using fallback text");
        fallback.to_string()
    } else {
        text
    }
}

pub(crate) fn gateway_error(message: &str, err: LlmError) -> AppError {
    AppError::gateway(message, err)
}
