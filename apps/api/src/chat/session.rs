//! Chat session state machine: `Idle → AwaitingResponse → Idle`.
//!
//! A failed turn appends an apology and returns to `Idle`, so the user can retry
//! immediately. Submitting while a turn is in flight is rejected.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::gateway::MAX_CONTEXT_MESSAGES;
use crate::models::chat::{tail, ChatMessage};

/// Upper bound on messages kept per session; the oldest are dropped first.
pub const MAX_STORED_MESSAGES: usize = 200;

pub const FAILURE_APOLOGY: &str = "Desculpe, tive um problema para responder agora. \
    Por favor, tente enviar sua mensagem novamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a response is still pending for this session")]
    Busy,

    #[error("no turn is in progress")]
    NoTurnInProgress,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    state: SessionState,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            last_activity: now,
            state: SessionState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Records the user's message and returns the context to forward with it
    /// (the last `MAX_CONTEXT_MESSAGES` messages before this one).
    pub fn begin_turn(&mut self, message: &str) -> Result<Vec<ChatMessage>, SessionError> {
        if self.state == SessionState::AwaitingResponse {
            return Err(SessionError::Busy);
        }
        let context = tail(&self.history, MAX_CONTEXT_MESSAGES).to_vec();
        self.push(ChatMessage::user(message));
        self.state = SessionState::AwaitingResponse;
        Ok(context)
    }

    pub fn complete_turn(&mut self, reply: impl Into<String>) -> Result<(), SessionError> {
        self.finish(ChatMessage::assistant(reply))
    }

    pub fn fail_turn(&mut self) -> Result<(), SessionError> {
        self.finish(ChatMessage::assistant(FAILURE_APOLOGY))
    }

    fn finish(&mut self, reply: ChatMessage) -> Result<(), SessionError> {
        if self.state != SessionState::AwaitingResponse {
            return Err(SessionError::NoTurnInProgress);
        }
        self.push(reply);
        self.state = SessionState::Idle;
        Ok(())
    }

    fn push(&mut self, message: ChatMessage) {
        self.history.push(message);
        if self.history.len() > MAX_STORED_MESSAGES {
            let excess = self.history.len() - MAX_STORED_MESSAGES;
            self.history.drain(..excess);
        }
        self.last_activity = Utc::now();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;

    #[test]
    fn test_turn_cycle_returns_to_idle() {
        let mut session = ChatSession::new();
        assert_eq!(session.state(), SessionState::Idle);

        let context = session.begin_turn("Como faço uma boa introdução?").unwrap();
        assert!(context.is_empty());
        assert_eq!(session.state(), SessionState::AwaitingResponse);

        session.complete_turn("Apresente o tema e a tese.").unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].role, Role::Assistant);
    }

    #[test]
    fn test_submit_while_awaiting_is_rejected() {
        let mut session = ChatSession::new();
        session.begin_turn("primeira").unwrap();
        assert_eq!(session.begin_turn("segunda"), Err(SessionError::Busy));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_failure_appends_apology_and_allows_retry() {
        let mut session = ChatSession::new();
        session.begin_turn("Oi").unwrap();
        session.fail_turn().unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.history().last().unwrap().content, FAILURE_APOLOGY);
        assert!(session.begin_turn("Oi de novo").is_ok());
    }

    #[test]
    fn test_finish_without_turn_is_error() {
        let mut session = ChatSession::new();
        assert_eq!(session.complete_turn("??"), Err(SessionError::NoTurnInProgress));
        assert_eq!(session.fail_turn(), Err(SessionError::NoTurnInProgress));
    }

    #[test]
    fn test_context_is_bounded_to_last_ten() {
        let mut session = ChatSession::new();
        for i in 0..8 {
            session.begin_turn(&format!("pergunta {i}")).unwrap();
            session.complete_turn(format!("resposta {i}")).unwrap();
        }
        let context = session.begin_turn("nova").unwrap();
        assert_eq!(context.len(), MAX_CONTEXT_MESSAGES);
        assert_eq!(context[0].content, "pergunta 3");
        assert_eq!(context.last().unwrap().content, "resposta 7");
    }

    #[test]
    fn test_stored_history_is_capped() {
        let mut session = ChatSession::new();
        for i in 0..(MAX_STORED_MESSAGES / 2 + 5) {
            session.begin_turn(&format!("q{i}")).unwrap();
            session.complete_turn(format!("a{i}")).unwrap();
        }
        assert_eq!(session.history().len(), MAX_STORED_MESSAGES);
        assert_eq!(session.history()[0].content, "q5");
    }
}
