//! Application Configuration Module
//!
//! This module centralizes the configuration for the interviewer service.
//! It loads settings from environment variables and provides a single
//! struct that `main` turns into a completion client, a frontend and the
//! session settings.

use interview_core::question::DEFAULT_MAX_ATTEMPTS;
use interview_core::session_state::{DEFAULT_TURN_COUNT, SessionSettings};
use secrecy::SecretString;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// Default bounded listen window for voice-mode capture.
pub const DEFAULT_LISTEN_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionProvider {
    OpenAI,
    Gemini,
}

impl CompletionProvider {
    fn default_model(&self) -> &'static str {
        match self {
            CompletionProvider::OpenAI => "gpt-4o",
            CompletionProvider::Gemini => "gemini-1.5-flash",
        }
    }
}

/// Holds all configuration loaded from the environment.
#[derive(Debug)]
pub struct Config {
    pub provider: CompletionProvider,
    /// Key for the selected provider; presence is validated at load time.
    pub api_key: SecretString,
    pub chat_model: String,
    pub log_level: Level,
    pub turn_count: usize,
    pub max_question_attempts: usize,
    pub listen_timeout: Duration,
    pub turn_pause: Duration,
    pub prompts_dir: Option<PathBuf>,
    pub speak_command: Option<String>,
}

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// A `.env` file in the current directory is loaded first if present.
    ///
    /// *   `COMPLETION_PROVIDER`: "openai" or "gemini". Defaults to "gemini".
    /// *   `OPENAI_API_KEY` / `GEMINI_API_KEY`: Required for the selected provider.
    /// *   `CHAT_MODEL`: (Optional) Model name. Defaults per provider.
    /// *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    /// *   `INTERVIEW_TURNS`: (Optional) Questions per session. Defaults to 5.
    /// *   `MAX_QUESTION_ATTEMPTS`: (Optional) Generation attempts per question. Defaults to 5.
    /// *   `LISTEN_TIMEOUT_SECS`: (Optional) Voice capture window. Defaults to 30.
    /// *   `TURN_PAUSE_MS`: (Optional) Pause between turns. Defaults to 0.
    /// *   `PROMPTS_DIR`: (Optional) Directory of `*.md` prompt overrides.
    /// *   `SPEAK_COMMAND`: (Optional) Text-to-speech program, e.g. `espeak`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match var("COMPLETION_PROVIDER")
            .unwrap_or_else(|| "gemini".to_string())
            .to_lowercase()
            .as_str()
        {
            "openai" => CompletionProvider::OpenAI,
            // Default to Gemini for "gemini" or any other value
            _ => CompletionProvider::Gemini,
        };

        let key_var = match provider {
            CompletionProvider::OpenAI => "OPENAI_API_KEY",
            CompletionProvider::Gemini => "GEMINI_API_KEY",
        };
        let api_key = var(key_var).map(SecretString::from).ok_or_else(|| {
            ConfigError::MissingVar(format!("{key_var} must be set for the selected provider"))
        })?;

        let chat_model =
            var("CHAT_MODEL").unwrap_or_else(|| provider.default_model().to_string());

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{log_level_str}' is not a valid log level"),
            )
        })?;

        let turn_count = positive(&var, "INTERVIEW_TURNS", DEFAULT_TURN_COUNT as u64)? as usize;
        let max_question_attempts =
            positive(&var, "MAX_QUESTION_ATTEMPTS", DEFAULT_MAX_ATTEMPTS as u64)? as usize;
        let listen_timeout = Duration::from_secs(positive(
            &var,
            "LISTEN_TIMEOUT_SECS",
            DEFAULT_LISTEN_TIMEOUT_SECS,
        )?);
        let turn_pause = Duration::from_millis(number(&var, "TURN_PAUSE_MS", 0)?);

        Ok(Self {
            provider,
            api_key,
            chat_model,
            log_level,
            turn_count,
            max_question_attempts,
            listen_timeout,
            turn_pause,
            prompts_dir: var("PROMPTS_DIR").map(PathBuf::from),
            speak_command: var("SPEAK_COMMAND"),
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            turn_count: self.turn_count,
            max_question_attempts: self.max_question_attempts,
            turn_pause: self.turn_pause,
        }
    }
}

fn number(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), format!("'{raw}': {e}"))),
    }
}

fn positive(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    let value = number(var, key, default)?;
    if value == 0 {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_gemini_key() {
        let config = load(&[("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.provider, CompletionProvider::Gemini);
        assert_eq!(config.api_key.expose_secret(), "g-key");
        assert_eq!(config.chat_model, "gemini-1.5-flash");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.turn_count, 5);
        assert_eq!(config.max_question_attempts, 5);
        assert_eq!(config.listen_timeout, Duration::from_secs(30));
        assert_eq!(config.turn_pause, Duration::ZERO);
        assert!(config.prompts_dir.is_none());
        assert!(config.speak_command.is_none());
    }

    #[test]
    fn test_openai_provider_requires_openai_key() {
        let err = load(&[("COMPLETION_PROVIDER", "OpenAI"), ("GEMINI_API_KEY", "g")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(msg) if msg.contains("OPENAI_API_KEY")));

        let config = load(&[("COMPLETION_PROVIDER", "openai"), ("OPENAI_API_KEY", "o")]).unwrap();
        assert_eq!(config.provider, CompletionProvider::OpenAI);
        assert_eq!(config.chat_model, "gpt-4o");
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        assert!(matches!(
            load(&[("GEMINI_API_KEY", "  ")]),
            Err(ConfigError::MissingVar(_))
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("GEMINI_API_KEY", "g"), ("RUST_LOG", "chatty")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "RUST_LOG"
        ));
        assert!(matches!(
            load(&[("GEMINI_API_KEY", "g"), ("INTERVIEW_TURNS", "0")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "INTERVIEW_TURNS"
        ));
        assert!(matches!(
            load(&[("GEMINI_API_KEY", "g"), ("TURN_PAUSE_MS", "soon")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "TURN_PAUSE_MS"
        ));
    }

    #[test]
    fn test_overrides_feed_session_settings() {
        let config = load(&[
            ("GEMINI_API_KEY", "g"),
            ("INTERVIEW_TURNS", "3"),
            ("MAX_QUESTION_ATTEMPTS", "2"),
            ("TURN_PAUSE_MS", "1500"),
            ("PROMPTS_DIR", "prompts"),
            ("SPEAK_COMMAND", "espeak"),
        ])
        .unwrap();
        let settings = config.session_settings();
        assert_eq!(settings.turn_count, 3);
        assert_eq!(settings.max_question_attempts, 2);
        assert_eq!(settings.turn_pause, Duration::from_millis(1500));
        assert_eq!(config.prompts_dir, Some(PathBuf::from("prompts")));
        assert_eq!(config.speak_command.as_deref(), Some("espeak"));
    }
}
