use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::chat::session::{ChatSession, SessionError, SessionState};
use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::models::iso_timestamp;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub state: SessionState,
    pub created_at: String,
    pub messages: Vec<ChatMessage>,
}

impl From<&ChatSession> for SessionSnapshot {
    fn from(session: &ChatSession) -> Self {
        Self {
            session_id: session.id,
            state: session.state(),
            created_at: iso_timestamp(session.created_at),
            messages: session.history().to_vec(),
        }
    }
}

/// In-memory chat sessions, bounded to `capacity` entries.
/// Nothing survives a restart.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, ChatSession>>>,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Creates a session, evicting the least-recently-active idle session when full.
    pub async fn create(&self) -> Result<SessionSnapshot, AppError> {
        let mut sessions = self.sessions.write().await;

        if sessions.len() >= self.capacity {
            let victim = sessions
                .values()
                .filter(|s| s.state() == SessionState::Idle)
                .min_by_key(|s| s.last_activity)
                .map(|s| s.id)
                .ok_or_else(|| {
                    AppError::Conflict("Limite de sessões atingido. Tente novamente.".to_string())
                })?;
            sessions.remove(&victim);
            info!("Evicted idle chat session {victim}");
        }

        let session = ChatSession::new();
        let snapshot = SessionSnapshot::from(&session);
        sessions.insert(session.id, session);
        Ok(snapshot)
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionSnapshot, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(SessionSnapshot::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    #[cfg(test)]
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Moves the session to `AwaitingResponse` and returns the context to forward.
    pub async fn begin_turn(&self, id: Uuid, message: &str) -> Result<Vec<ChatMessage>, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.begin_turn(message).map_err(|e| match e {
            SessionError::Busy => AppError::Conflict(
                "Aguarde a resposta anterior antes de enviar outra mensagem.".to_string(),
            ),
            other => AppError::Internal(other.into()),
        })
    }

    /// Records the outcome of a turn. A session deleted mid-turn is ignored.
    pub async fn finish_turn(&self, id: Uuid, reply: Option<&str>) {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(&id) else {
            debug!("Chat session {id} removed before its turn finished");
            return;
        };
        let result = match reply {
            Some(text) => session.complete_turn(text),
            None => session.fail_turn(),
        };
        if let Err(e) = result {
            debug!("Chat session {id}: {e}");
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Sessão {id} não encontrada"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(4);
        let created = store.create().await.unwrap();
        let fetched = store.get(created.session_id).await.unwrap();
        assert_eq!(fetched.state, SessionState::Idle);
        assert!(fetched.messages.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new(4);
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(store.remove(Uuid::new_v4()).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_busy_session_maps_to_conflict() {
        let store = SessionStore::new(4);
        let id = store.create().await.unwrap().session_id;
        store.begin_turn(id, "primeira").await.unwrap();
        let err = store.begin_turn(id, "segunda").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        store.finish_turn(id, Some("resposta")).await;
        assert!(store.begin_turn(id, "segunda").await.is_ok());
    }

    #[tokio::test]
    async fn test_full_store_evicts_oldest_idle_session() {
        let store = SessionStore::new(2);
        let first = store.create().await.unwrap().session_id;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.create().await.unwrap().session_id;

        let third = store.create().await.unwrap().session_id;
        assert_eq!(store.session_count().await, 2);
        assert!(store.get(first).await.is_err());
        assert!(store.get(second).await.is_ok());
        assert!(store.get(third).await.is_ok());
    }

    #[tokio::test]
    async fn test_full_store_with_only_busy_sessions_rejects_create() {
        let store = SessionStore::new(1);
        let id = store.create().await.unwrap().session_id;
        store.begin_turn(id, "pensando").await.unwrap();
        assert!(matches!(store.create().await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_finish_turn_on_removed_session_is_ignored() {
        let store = SessionStore::new(2);
        let id = store.create().await.unwrap().session_id;
        store.begin_turn(id, "Oi").await.unwrap();
        store.remove(id).await.unwrap();
        store.finish_turn(id, None).await;
        assert_eq!(store.session_count().await, 0);
    }
}
