use serde::{Deserialize, Serialize};

/// Maximum score for a single ENEM competency.
pub const MAX_COMPETENCY_SCORE: u32 = 200;
pub const COMPETENCY_COUNT: usize = 5;

/// Official names of the five ENEM essay competencies, C1 through C5.
pub const COMPETENCY_LABELS: [&str; COMPETENCY_COUNT] = [
    "Domínio da modalidade escrita formal da língua portuguesa",
    "Compreensão da proposta de redação e aplicação de conceitos das várias áreas de conhecimento",
    "Seleção, relação, organização e interpretação de informações, fatos, opiniões e argumentos",
    "Conhecimento dos mecanismos linguísticos necessários para a construção da argumentação",
    "Elaboração de proposta de intervenção para o problema abordado, respeitando os direitos humanos",
];

/// An essay submitted for evaluation. Consumed once, never persisted.
#[derive(Debug, Clone)]
pub struct EssaySubmission {
    pub text: String,
    pub theme: Option<String>,
}

impl EssaySubmission {
    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyScore {
    /// 1..=5
    pub index: u8,
    pub label: String,
    /// 0..=200
    pub score: u32,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    pub fn from_final_score(score: u32) -> Self {
        match score {
            900.. => Level::Expert,
            750..=899 => Level::Advanced,
            600..=749 => Level::Intermediate,
            _ => Level::Beginner,
        }
    }
}

/// Which scorer produced a report. Demo reports are placeholders, not grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerBackend {
    Llm,
    Demo,
}

/// Structured evaluation of one essay.
///
/// `final_score` is always the sum of the five competency scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResult {
    pub final_score: u32,
    pub competencies: Vec<CompetencyScore>,
    pub overall_strengths: Vec<String>,
    pub overall_improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub word_count: usize,
    pub level: Level,
    pub scorer_backend: ScorerBackend,
}
