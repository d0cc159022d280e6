// Essay scoring prompt. The model must answer with the JSON shape below;
// `report::RawEvaluation` mirrors it.

pub const SCORING_SYSTEM_SUFFIX: &str = "\
All human-readable strings in the JSON MUST be written in Brazilian Portuguese. \
You are an experienced ENEM essay grader. Grade strictly by the official rubric.";

/// Renders the scoring prompt. Both inputs are inserted verbatim in one pass,
/// so placeholder-like text inside either one is never expanded.
pub fn scoring_prompt(theme: Option<&str>, essay_text: &str) -> String {
    format!(
        r#"Avalie a redação abaixo segundo as cinco competências oficiais do ENEM.

{theme_line}
REDAÇÃO:
{essay_text}

OUTPUT SCHEMA (return exactly this structure):
{{
  "competencies": [
    {{
      "index": 1,            // 1 a 5, uma entrada por competência
      "score": 160,          // inteiro de 0 a 200
      "strengths": ["string"],
      "improvements": ["string"]
    }}
  ],
  "overallStrengths": ["string"],
  "overallImprovements": ["string"],
  "suggestions": ["string"]
}}

Regras:
- Exatamente cinco competências, índices 1, 2, 3, 4 e 5.
- Notas de cada competência entre 0 e 200.
- Não inclua a nota final; ela é calculada a partir das competências."#,
        theme_line = theme_line(theme),
    )
}

/// Renders the theme line, or a note that no theme was given.
pub fn theme_line(theme: Option<&str>) -> String {
    match theme {
        Some(t) if !t.trim().is_empty() => format!("TEMA: {}\n", t.trim()),
        _ => "TEMA: não informado (avalie a adequação ao tema implícito no texto)\n".to_string(),
    }
}
