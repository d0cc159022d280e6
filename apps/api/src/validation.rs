//! Request validation — shallow, stateless checks run before any gateway call.
//!
//! Lengths are counted in UTF-16 code units so the thresholds and the
//! reported `essayLength` agree with what a JavaScript client measures.

use serde_json::Value;

use crate::errors::AppError;

/// Minimum essay length accepted by the raw correction endpoint.
pub const MIN_CORRECTION_CHARS: usize = 50;
/// Minimum essay length for the interactive report path.
pub const MIN_REPORT_CHARS: usize = 100;
/// Minimum theme length for repertoire suggestions.
pub const MIN_THEME_CHARS: usize = 3;

pub const MISSING_MESSAGE: &str = "Mensagem é obrigatória";
pub const MISSING_ESSAY: &str = "Texto da redação é obrigatório";
pub const MISSING_THEME: &str = "Tema é obrigatório";

/// Length of `text` as a JavaScript `String.prototype.length` would report it.
pub fn js_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Extracts a non-empty string from an optional JSON value.
/// Missing, `null`, non-string and empty values all fail with `missing_msg`.
pub fn require_string<'a>(value: Option<&'a Value>, missing_msg: &str) -> Result<&'a str, AppError> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
        _ => Err(AppError::Validation(missing_msg.to_string())),
    }
}

/// Rejects `text` shorter than `min` with the constraint spelled out.
pub fn require_min_length(text: &str, min: usize, too_short_prefix: &str) -> Result<(), AppError> {
    if js_length(text) < min {
        return Err(AppError::Validation(format!(
            "{too_short_prefix}. Mínimo de {min} caracteres."
        )));
    }
    Ok(())
}

pub fn validate_chat_message(value: Option<&Value>) -> Result<&str, AppError> {
    require_string(value, MISSING_MESSAGE)
}

pub fn validate_essay(value: Option<&Value>, min: usize) -> Result<&str, AppError> {
    let text = require_string(value, MISSING_ESSAY)?;
    require_min_length(text, min, "Redação muito curta")?;
    Ok(text)
}

pub fn validate_theme(value: Option<&Value>) -> Result<&str, AppError> {
    let theme = require_string(value, MISSING_THEME)?;
    require_min_length(theme, MIN_THEME_CHARS, "Tema muito curto")?;
    Ok(theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message_of(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_chat_message_missing() {
        let err = validate_chat_message(None).unwrap_err();
        assert_eq!(message_of(err), "Mensagem é obrigatória");
    }

    #[test]
    fn test_chat_message_null_empty_and_non_string() {
        for value in [json!(null), json!(""), json!(42), json!(["oi"]), json!({"a": 1})] {
            assert!(validate_chat_message(Some(&value)).is_err(), "{value} accepted");
        }
    }

    #[test]
    fn test_chat_message_whitespace_is_accepted() {
        let value = json!("   ");
        assert_eq!(validate_chat_message(Some(&value)).unwrap(), "   ");
    }

    #[test]
    fn test_essay_too_short_message() {
        let value = json!("short");
        let err = validate_essay(Some(&value), MIN_CORRECTION_CHARS).unwrap_err();
        assert_eq!(message_of(err), "Redação muito curta. Mínimo de 50 caracteres.");
    }

    #[test]
    fn test_essay_exactly_at_threshold_passes() {
        let value = json!("a".repeat(50));
        assert!(validate_essay(Some(&value), MIN_CORRECTION_CHARS).is_ok());
        let value = json!("a".repeat(49));
        assert!(validate_essay(Some(&value), MIN_CORRECTION_CHARS).is_err());
    }

    #[test]
    fn test_essay_report_threshold_is_100() {
        let value = json!("a".repeat(99));
        let err = validate_essay(Some(&value), MIN_REPORT_CHARS).unwrap_err();
        assert!(message_of(err).contains("100"));
    }

    #[test]
    fn test_essay_missing() {
        let err = validate_essay(Some(&json!(null)), MIN_CORRECTION_CHARS).unwrap_err();
        assert_eq!(message_of(err), "Texto da redação é obrigatório");
    }

    #[test]
    fn test_theme_too_short() {
        let err = validate_theme(Some(&json!("ai"))).unwrap_err();
        assert_eq!(message_of(err), "Tema muito curto. Mínimo de 3 caracteres.");
        assert!(validate_theme(Some(&json!("fé!"))).is_ok());
    }

    #[test]
    fn test_js_length_counts_utf16_units() {
        assert_eq!(js_length("redação"), 7);
        // Astral-plane characters count twice, as in JavaScript.
        assert_eq!(js_length("😀"), 2);
    }
}
