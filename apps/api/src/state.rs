use std::sync::Arc;

use crate::chat::store::SessionStore;
use crate::config::{Config, ScoringMode};
use crate::llm_client::TextGenerator;
use crate::scoring::{DemoEssayScorer, EssayScorer, LlmEssayScorer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The only path to the external text-generation service.
    pub llm: Arc<dyn TextGenerator>,
    /// Report backend. Default: LlmEssayScorer. Swap via SCORING_MODE.
    pub scorer: Arc<dyn EssayScorer>,
    pub sessions: SessionStore,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<dyn TextGenerator>) -> Self {
        let scorer: Arc<dyn EssayScorer> = match config.scoring_mode {
            ScoringMode::Llm => Arc::new(LlmEssayScorer::new(llm.clone())),
            ScoringMode::Demo => Arc::new(DemoEssayScorer),
        };

        Self {
            llm,
            scorer,
            sessions: SessionStore::new(config.max_chat_sessions),
            config,
        }
    }
}
