use anyhow::{bail, Context, Result};

/// Which backend shapes essay reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    /// Parse the model's JSON evaluation into a report.
    Llm,
    /// Fixed placeholder scores, labelled as such in every report.
    Demo,
}

impl ScoringMode {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "llm" => Ok(ScoringMode::Llm),
            "demo" => Ok(ScoringMode::Demo),
            other => bail!("SCORING_MODE must be 'llm' or 'demo', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if the API key is missing.
///
/// Outbound calls default to one best-effort attempt with no explicit timeout.
/// `LLM_MAX_RETRIES` (total attempts) and `LLM_TIMEOUT_SECS` opt into bounded
/// retry and a client-side timeout.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub scoring_mode: ScoringMode,
    pub llm_max_retries: u32,
    pub llm_timeout_secs: Option<u64>,
    pub max_chat_sessions: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let llm_max_retries = optional("LLM_MAX_RETRIES", "1")
            .parse::<u32>()
            .context("LLM_MAX_RETRIES must be a positive integer")?;
        if llm_max_retries == 0 {
            bail!("LLM_MAX_RETRIES must be at least 1");
        }

        let llm_timeout_secs = lookup("LLM_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("LLM_TIMEOUT_SECS must be a number of seconds")?;

        Ok(Config {
            anthropic_api_key: require(&lookup, "ANTHROPIC_API_KEY")?,
            port: optional("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
            scoring_mode: ScoringMode::parse(&optional("SCORING_MODE", "llm"))?,
            llm_max_retries,
            llm_timeout_secs,
            max_chat_sessions: optional("MAX_CHAT_SESSIONS", "1000")
                .parse::<usize>()
                .context("MAX_CHAT_SESSIONS must be a positive integer")?,
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

#[cfg(test)]
impl Config {
    /// Configuration used by router tests; never reads the environment.
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            scoring_mode: ScoringMode::Llm,
            llm_max_retries: 1,
            llm_timeout_secs: Some(5),
            max_chat_sessions: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_scoring_mode_parses_known_values() {
        assert_eq!(ScoringMode::parse("llm").unwrap(), ScoringMode::Llm);
        assert_eq!(ScoringMode::parse(" DEMO ").unwrap(), ScoringMode::Demo);
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_single_attempt_without_timeout() {
        let config = Config::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.llm_max_retries, 1);
        assert_eq!(config.llm_timeout_secs, None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.scoring_mode, ScoringMode::Llm);
    }

    #[test]
    fn test_retry_and_timeout_are_opt_in() {
        let config = Config::from_lookup(lookup_from(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("LLM_MAX_RETRIES", "3"),
            ("LLM_TIMEOUT_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(config.llm_max_retries, 3);
        assert_eq!(config.llm_timeout_secs, Some(60));
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_zero_attempts_is_rejected() {
        let lookup = lookup_from(&[("ANTHROPIC_API_KEY", "sk-test"), ("LLM_MAX_RETRIES", "0")]);
        assert!(Config::from_lookup(lookup).is_err());
    }

    #[test]
    fn test_scoring_mode_rejects_unknown_value() {
        let err = ScoringMode::parse("random").unwrap_err();
        assert!(err.to_string().contains("random"));
    }
}
