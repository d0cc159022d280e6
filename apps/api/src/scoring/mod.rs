//! Essay scoring — pluggable, trait-based producer of `CorrectionResult`s.
//!
//! `LlmEssayScorer` asks the model for a strict JSON evaluation and shapes it.
//! `DemoEssayScorer` returns fixed placeholder scores for demos; its reports are
//! tagged `scorerBackend: "demo"` and say so in their suggestions.
//!
//! `AppState` holds an `Arc<dyn EssayScorer>`, chosen at startup via `SCORING_MODE`.

pub mod prompts;
pub mod report;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::gateway::gateway_error;
use crate::gateway::prompts::CORRECTION_FAILED;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{generate_json, TextGenerator};
use crate::models::essay::{CorrectionResult, EssaySubmission, ScorerBackend, COMPETENCY_COUNT};

use prompts::{scoring_prompt, SCORING_SYSTEM_SUFFIX};
use report::{shape_report, RawCompetency, RawEvaluation};

#[async_trait]
pub trait EssayScorer: Send + Sync {
    async fn score(&self, essay: &EssaySubmission) -> Result<CorrectionResult, AppError>;
}

pub struct LlmEssayScorer {
    generator: Arc<dyn TextGenerator>,
}

impl LlmEssayScorer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl EssayScorer for LlmEssayScorer {
    async fn score(&self, essay: &EssaySubmission) -> Result<CorrectionResult, AppError> {
        let prompt = scoring_prompt(essay.theme.as_deref(), &essay.text);
        let system = format!("{JSON_ONLY_SYSTEM} {SCORING_SYSTEM_SUFFIX}");

        let raw: RawEvaluation = generate_json(self.generator.as_ref(), &system, &prompt)
            .await
            .map_err(|e| gateway_error(CORRECTION_FAILED, e))?;

        let report = shape_report(essay, raw, ScorerBackend::Llm)
            .map_err(|e| AppError::gateway(CORRECTION_FAILED, e))?;

        info!(
            "Essay scored: final_score={}, level={:?}, words={}",
            report.final_score, report.level, report.word_count
        );
        Ok(report)
    }
}

/// Placeholder score per competency in demo mode.
pub const DEMO_COMPETENCY_SCORE: f64 = 120.0;

pub const DEMO_NOTICE: &str = "Relatório de demonstração: as notas são fixas e não avaliam \
    esta redação. Configure SCORING_MODE=llm para uma correção real.";

/// Deterministic stand-in used when no real evaluation is wanted.
pub struct DemoEssayScorer;

#[async_trait]
impl EssayScorer for DemoEssayScorer {
    async fn score(&self, essay: &EssaySubmission) -> Result<CorrectionResult, AppError> {
        let raw = RawEvaluation {
            competencies: (1..=COMPETENCY_COUNT as u8)
                .map(|index| RawCompetency {
                    index: Some(index),
                    score: DEMO_COMPETENCY_SCORE,
                    strengths: vec![],
                    improvements: vec![],
                })
                .collect(),
            overall_strengths: vec![],
            overall_improvements: vec![],
            suggestions: vec![DEMO_NOTICE.to_string()],
        };

        shape_report(essay, raw, ScorerBackend::Demo).map_err(|e| AppError::Internal(e.into()))
    }
}
