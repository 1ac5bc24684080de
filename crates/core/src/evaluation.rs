use crate::completion::Completion;
use crate::parser::parse_evaluation;
use crate::prompts::PromptSet;
use crate::session_config::SessionConfig;
use serde::Serialize;

/// Minimum score (inclusive) for an answer to count as correct.
pub const PASS_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnswerStatus {
    Correct,
    Incorrect,
}

impl AnswerStatus {
    /// The threshold is the only source of truth for pass/fail.
    pub fn from_score(score: f64) -> Self {
        if score >= PASS_THRESHOLD {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerStatus::Correct => "Correct",
            AnswerStatus::Incorrect => "Incorrect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub score: f64,
    pub feedback: String,
    pub suggestions: String,
    pub status: AnswerStatus,
}

impl EvaluationResult {
    /// Builds a result whose status is derived from `score`.
    pub fn new(score: f64, feedback: impl Into<String>, suggestions: impl Into<String>) -> Self {
        Self {
            score,
            feedback: feedback.into(),
            suggestions: suggestions.into(),
            status: AnswerStatus::from_score(score),
        }
    }

    /// Fixed result for an absent or empty answer.
    pub fn no_response() -> Self {
        Self::new(
            0.0,
            "No response detected.",
            "Please provide a clear and detailed answer.",
        )
    }

    /// Fixed result used when the completion service could not be reached.
    pub fn unavailable(role_title: &str) -> Self {
        Self::new(
            50.0,
            "Unable to evaluate answer.",
            format!("Try to be more specific and structured for a {role_title} role."),
        )
    }

    pub fn is_correct(&self) -> bool {
        self.status == AnswerStatus::Correct
    }

    /// Multi-line rendering shown to the candidate after each answer.
    pub fn summary(&self) -> String {
        format!(
            "Answer Status: {}\nScore: {:.1}/100\nFeedback: {}\nSuggestions: {}",
            self.status.as_str(),
            self.score,
            self.feedback,
            self.suggestions
        )
    }
}

/// Scores a candidate's answer through the completion service.
///
/// Never retries: a failed call degrades straight to [`EvaluationResult::unavailable`].
pub struct AnswerEvaluator<'a, C: Completion + ?Sized> {
    completion: &'a C,
    prompts: &'a PromptSet,
}

impl<'a, C: Completion + ?Sized> AnswerEvaluator<'a, C> {
    pub fn new(completion: &'a C, prompts: &'a PromptSet) -> Self {
        Self {
            completion,
            prompts,
        }
    }

    pub async fn evaluate(
        &self,
        question: &str,
        answer: Option<&str>,
        config: &SessionConfig,
    ) -> EvaluationResult {
        let answer = match answer.map(str::trim) {
            Some(answer) if !answer.is_empty() => answer,
            _ => {
                tracing::debug!("No answer captured; skipping evaluation call.");
                return EvaluationResult::no_response();
            }
        };

        let prompt = self.prompts.render_evaluation(config, question, answer);
        match self.completion.complete(&prompt).await {
            Ok(text) => {
                let result = parse_evaluation(
                    text.trim(),
                    &config.role_title,
                    config.difficulty.as_str(),
                );
                tracing::debug!(score = result.score, status = ?result.status, "Answer evaluated.");
                result
            }
            Err(e) => {
                tracing::warn!("Error evaluating answer: {:?}", e);
                EvaluationResult::unavailable(&config.role_title)
            }
        }
    }
}
