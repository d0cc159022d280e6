pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as sessions;
use crate::gateway::handlers as maria;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assistant API
        .route(
            "/api/maria/chat",
            get(maria::handle_chat_info).post(maria::handle_chat),
        )
        .route("/api/maria/correction", post(maria::handle_correction))
        .route(
            "/api/maria/correction/report",
            post(maria::handle_correction_report),
        )
        .route("/api/maria/repertoire", post(maria::handle_repertoire))
        // Chat sessions
        .route("/api/maria/sessions", post(sessions::handle_create_session))
        .route(
            "/api/maria/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/maria/sessions/:id/messages",
            post(sessions::handle_session_message),
        )
        .with_state(state)
}
