//! Server-side chat sessions with the assistant.

pub mod handlers;
pub mod session;
pub mod store;

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::AppError;
use crate::gateway;
use crate::llm_client::TextGenerator;
use store::SessionStore;

/// Runs one chat turn for a stored session and returns the assistant's reply.
///
/// The gateway call runs in its own task so that a dropped request still
/// settles the session back to `Idle`.
pub async fn run_turn(
    store: &SessionStore,
    generator: Arc<dyn TextGenerator>,
    id: Uuid,
    message: String,
) -> Result<String, AppError> {
    let context = store.begin_turn(id, &message).await?;
    let store = store.clone();

    let task = tokio::spawn(async move {
        let result = gateway::chat_reply(generator.as_ref(), &message, &context).await;
        store
            .finish_turn(id, result.as_ref().ok().map(String::as_str))
            .await;
        result
    });

    task.await.map_err(|e| AppError::Internal(e.into()))?
}
