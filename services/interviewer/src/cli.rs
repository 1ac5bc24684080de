use anyhow::{Result, ensure};
use clap::Parser;
use interview_core::session_state::SessionSettings;
use std::path::PathBuf;

/// Runs one mock interview in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Number of questions to ask (overrides INTERVIEW_TURNS)
    #[arg(long)]
    pub turns: Option<usize>,
    /// Generation attempts per question (overrides MAX_QUESTION_ATTEMPTS)
    #[arg(long)]
    pub max_attempts: Option<usize>,
    /// Directory of prompt overrides (overrides PROMPTS_DIR)
    #[arg(long)]
    pub prompts: Option<PathBuf>,
}

impl Cli {
    /// Layers the command-line overrides on top of the configured settings.
    pub fn apply(&self, mut settings: SessionSettings) -> Result<SessionSettings> {
        if let Some(turns) = self.turns {
            ensure!(turns > 0, "--turns must be at least 1");
            settings.turn_count = turns;
        }
        if let Some(attempts) = self.max_attempts {
            ensure!(attempts > 0, "--max-attempts must be at least 1");
            settings.max_question_attempts = attempts;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn configured() -> SessionSettings {
        SessionSettings {
            turn_count: 5,
            max_question_attempts: 5,
            turn_pause: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_flags_override_configured_settings() {
        let cli = Cli::try_parse_from(["interviewer", "--turns", "3", "--max-attempts", "2"]).unwrap();
        let settings = cli.apply(configured()).unwrap();
        assert_eq!(settings.turn_count, 3);
        assert_eq!(settings.max_question_attempts, 2);
        assert_eq!(settings.turn_pause, Duration::from_millis(250));
    }

    #[test]
    fn test_no_flags_keep_configured_settings() {
        let cli = Cli::try_parse_from(["interviewer"]).unwrap();
        let settings = cli.apply(configured()).unwrap();
        assert_eq!(settings.turn_count, 5);
        assert_eq!(settings.max_question_attempts, 5);
        assert!(cli.prompts.is_none());
    }

    #[test]
    fn test_zero_overrides_are_rejected() {
        let cli = Cli::try_parse_from(["interviewer", "--turns", "0"]).unwrap();
        let err = cli.apply(configured()).unwrap_err();
        assert!(err.to_string().contains("--turns"));

        let cli = Cli::try_parse_from(["interviewer", "--max-attempts", "0"]).unwrap();
        let err = cli.apply(configured()).unwrap_err();
        assert!(err.to_string().contains("--max-attempts"));
    }

    #[test]
    fn test_prompts_dir_flag_is_parsed() {
        let cli = Cli::try_parse_from(["interviewer", "--prompts", "my_prompts"]).unwrap();
        assert_eq!(cli.prompts, Some(PathBuf::from("my_prompts")));
    }
}
