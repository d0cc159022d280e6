//! Result shaping — turns the model's evaluation into a `CorrectionResult`.
//!
//! Invariants enforced here regardless of what the model returns:
//! - exactly five competencies, indices 1..=5, each present once
//! - every score rounded and clamped to [0, 200]
//! - `final_score` is the sum of the clamped scores
//! - labels are the official names, never the model's

use serde::Deserialize;
use thiserror::Error;

use crate::models::essay::{
    CompetencyScore, CorrectionResult, EssaySubmission, Level, ScorerBackend, COMPETENCY_COUNT,
    COMPETENCY_LABELS, MAX_COMPETENCY_SCORE,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompetency {
    /// Falls back to the entry's position when absent.
    #[serde(default)]
    pub index: Option<u8>,
    pub score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// The JSON object the scoring prompt asks the model to produce.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvaluation {
    pub competencies: Vec<RawCompetency>,
    #[serde(default)]
    pub overall_strengths: Vec<String>,
    #[serde(default)]
    pub overall_improvements: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("expected 5 competencies, got {0}")]
    WrongCount(usize),

    #[error("competency index {0} is outside 1..=5")]
    InvalidIndex(u8),

    #[error("competency index {0} appears more than once")]
    DuplicateIndex(u8),
}

pub fn clamp_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, MAX_COMPETENCY_SCORE as f64) as u32
}

/// Builds the final report for `essay` from a raw evaluation.
pub fn shape_report(
    essay: &EssaySubmission,
    raw: RawEvaluation,
    backend: ScorerBackend,
) -> Result<CorrectionResult, ShapeError> {
    if raw.competencies.len() != COMPETENCY_COUNT {
        return Err(ShapeError::WrongCount(raw.competencies.len()));
    }

    let mut slots: [Option<CompetencyScore>; COMPETENCY_COUNT] = Default::default();

    for (position, comp) in raw.competencies.into_iter().enumerate() {
        let index = comp.index.unwrap_or(position as u8 + 1);
        if !(1..=COMPETENCY_COUNT as u8).contains(&index) {
            return Err(ShapeError::InvalidIndex(index));
        }
        let slot = &mut slots[index as usize - 1];
        if slot.is_some() {
            return Err(ShapeError::DuplicateIndex(index));
        }
        *slot = Some(CompetencyScore {
            index,
            label: COMPETENCY_LABELS[index as usize - 1].to_string(),
            score: clamp_score(comp.score),
            strengths: comp.strengths,
            improvements: comp.improvements,
        });
    }

    // Five entries, each index in range and unique: every slot is filled.
    let competencies: Vec<CompetencyScore> = slots.into_iter().flatten().collect();
    let final_score = competencies.iter().map(|c| c.score).sum();

    Ok(CorrectionResult {
        final_score,
        competencies,
        overall_strengths: raw.overall_strengths,
        overall_improvements: raw.overall_improvements,
        suggestions: raw.suggestions,
        word_count: essay.word_count(),
        level: Level::from_final_score(final_score),
        scorer_backend: backend,
    })
}
