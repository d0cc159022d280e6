use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single turn of a conversation with the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Some(super::timestamp_now()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Parses a client-supplied `conversationHistory` value.
///
/// Anything that is not an array yields an empty history; array entries that
/// do not look like a `ChatMessage` are skipped rather than failing the request.
pub fn parse_history(value: Option<&Value>) -> Vec<ChatMessage> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<ChatMessage>(item.clone()) {
            Ok(msg) => Some(msg),
            Err(e) => {
                debug!("Skipping malformed history entry: {e}");
                None
            }
        })
        .collect()
}

/// Keeps only the last `limit` messages.
pub fn tail(history: &[ChatMessage], limit: usize) -> &[ChatMessage] {
    let start = history.len().saturating_sub(limit);
    &history[start..]
}
