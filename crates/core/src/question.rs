use crate::completion::Completion;
use crate::prompts::PromptSet;
use crate::session_config::SessionConfig;
use serde::Serialize;

/// Default ceiling on completion calls spent looking for one unique question.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Questions already asked in this session, in the order they were accepted.
#[derive(Debug, Default, Clone)]
pub struct QuestionHistory {
    questions: Vec<String>,
}

impl QuestionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, question: &str) -> bool {
        self.questions.iter().any(|q| q == question)
    }

    pub(crate) fn push(&mut self, question: String) {
        self.questions.push(question);
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionOrigin {
    /// Produced by the completion service and unique within the session.
    Generated,
    /// The templated stand-in used when generation failed; may repeat.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub text: String,
    pub origin: QuestionOrigin,
}

pub fn fallback_question(role_title: &str) -> String {
    format!("Tell me about your experience as a {role_title}.")
}

pub struct QuestionGenerator<'a, C: Completion + ?Sized> {
    completion: &'a C,
    prompts: &'a PromptSet,
    max_attempts: usize,
}

impl<'a, C: Completion + ?Sized> QuestionGenerator<'a, C> {
    pub fn new(completion: &'a C, prompts: &'a PromptSet, max_attempts: usize) -> Self {
        Self {
            completion,
            prompts,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Asks the completion service for a question not yet in `history`.
    ///
    /// Empty or duplicate replies are retried up to `max_attempts` times in
    /// total. A service error or running out of attempts yields the templated
    /// fallback question instead. Accepted questions are appended to `history`.
    pub async fn generate(&self, config: &SessionConfig, history: &mut QuestionHistory) -> Question {
        for attempt in 1..=self.max_attempts {
            let prompt = self.prompts.render_question(config, history);
            let reply = match self.completion.complete(&prompt).await {
                Ok(reply) => reply,
                Err(e) => {
                    tracing::warn!("Error generating question: {:?}", e);
                    return Self::fallback(config, history);
                }
            };

            let text = reply.trim();
            if text.is_empty() {
                tracing::warn!(attempt, "Completion service returned an empty question.");
                continue;
            }
            if history.contains(text) {
                tracing::warn!(attempt, "Duplicate question returned, retrying: {:?}", text);
                continue;
            }

            history.push(text.to_string());
            return Question {
                text: text.to_string(),
                origin: QuestionOrigin::Generated,
            };
        }

        tracing::warn!(
            "No unique question after {} attempts; using fallback.",
            self.max_attempts
        );
        Self::fallback(config, history)
    }

    fn fallback(config: &SessionConfig, history: &mut QuestionHistory) -> Question {
        let text = fallback_question(&config.role_title);
        // Best effort only: a repeated fallback is still returned.
        if !history.contains(&text) {
            history.push(text.clone());
        }
        Question {
            text,
            origin: QuestionOrigin::Fallback,
        }
    }
}
