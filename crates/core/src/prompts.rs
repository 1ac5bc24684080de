//! Prompt templates sent to the completion service.
//!
//! Templates use `{placeholder}` markers that are filled in at render time:
//!
//! * `question`: `{role}`, `{difficulty}`, `{style}`, `{style_focus}`, `{previous}`
//! * `evaluation`: `{role}`, `{difficulty}`, `{style}`, `{question}`, `{answer}`

use crate::question::QuestionHistory;
use crate::session_config::SessionConfig;
use std::collections::HashMap;

pub const QUESTION_PROMPT_KEY: &str = "question";
pub const EVALUATION_PROMPT_KEY: &str = "evaluation";

const DEFAULT_QUESTION_PROMPT: &str = r#"Generate a single, concise {style} interview question for a {role} role at a {difficulty} level.
The question must be appropriate for the role, difficulty level (Beginner, Intermediate, or Advanced), and {style_focus}.
Ensure the question is different from these previously asked questions: {previous}.
Respond with the question text only."#;

const DEFAULT_EVALUATION_PROMPT: &str = r#"Evaluate the following answer to the {style} interview question for a {role} role at {difficulty} level: '{question}'
Answer: '{answer}'

Provide a score out of 100 based on:
- Relevance (50%): Does the answer address the question and {style} expectations for the role?
- Clarity (25%): Is the answer clear and well-structured?
- Completeness (25%): Does the answer provide sufficient detail for the {difficulty} level?

Respond with exactly these three lines and nothing else:
Score: <total score out of 100>
Feedback: <one sentence summarizing the evaluation>
Suggestions: <one sentence with improvement suggestions>"#;

#[derive(Debug, Clone)]
pub struct PromptSet {
    question: String,
    evaluation: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            question: DEFAULT_QUESTION_PROMPT.to_string(),
            evaluation: DEFAULT_EVALUATION_PROMPT.to_string(),
        }
    }
}

impl PromptSet {
    /// Replaces built-in templates with any matching entries in `overrides`.
    /// Keys are template names (`question`, `evaluation`); others are ignored.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (key, template) in overrides {
            match key.as_str() {
                QUESTION_PROMPT_KEY => self.question = template.clone(),
                EVALUATION_PROMPT_KEY => self.evaluation = template.clone(),
                other => tracing::warn!("Ignoring unknown prompt template '{}'", other),
            }
        }
        self
    }

    pub fn render_question(&self, config: &SessionConfig, history: &QuestionHistory) -> String {
        let previous = if history.is_empty() {
            "None".to_string()
        } else {
            history.iter().collect::<Vec<_>>().join(", ")
        };
        fill(
            &self.question,
            &[
                ("role", config.role_title.as_str()),
                ("difficulty", config.difficulty.as_str()),
                ("style", config.interview_style.as_str()),
                ("style_focus", config.interview_style.focus()),
                ("previous", previous.as_str()),
            ],
        )
    }

    pub fn render_evaluation(&self, config: &SessionConfig, question: &str, answer: &str) -> String {
        fill(
            &self.evaluation,
            &[
                ("role", config.role_title.as_str()),
                ("difficulty", config.difficulty.as_str()),
                ("style", config.interview_style.label()),
                ("question", question),
                ("answer", answer),
            ],
        )
    }
}

// Single pass, so text substituted in (e.g. an answer containing "{role}")
// is never expanded again.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let value = tail.find('}').and_then(|end| {
            let key = &tail[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_config::{Difficulty, InterviewStyle};

    fn config() -> SessionConfig {
        SessionConfig {
            candidate_name: "Ada".to_string(),
            role_title: "Marketing Manager".to_string(),
            difficulty: Difficulty::Advanced,
            interview_style: InterviewStyle::NonTechnical,
        }
    }

    #[test]
    fn test_question_prompt_lists_previous_questions() {
        let prompts = PromptSet::default();
        let mut history = QuestionHistory::new();

        let first = prompts.render_question(&config(), &history);
        assert!(first.contains("previously asked questions: None."));
        assert!(first.contains("Non-technical interview question for a Marketing Manager role at a Advanced level"));
        assert!(first.contains("behavioral, leadership, or soft skills"));

        history.push("Q1?".to_string());
        history.push("Q2?".to_string());
        let second = prompts.render_question(&config(), &history);
        assert!(second.contains("previously asked questions: Q1?, Q2?."));
    }

    #[test]
    fn test_evaluation_prompt_embeds_weighting_and_answer() {
        let prompts = PromptSet::default();
        let text = prompts.render_evaluation(&config(), "How do you lead?", "By example.");
        assert!(text.contains("non-technical interview question for a Marketing Manager role at Advanced level: 'How do you lead?'"));
        assert!(text.contains("Answer: 'By example.'"));
        assert!(text.contains("Relevance (50%)"));
        assert!(text.contains("Clarity (25%)"));
        assert!(text.contains("Completeness (25%)"));
    }

    #[test]
    fn test_overrides_replace_known_templates_only() {
        let mut overrides = HashMap::new();
        overrides.insert("question".to_string(), "Ask a {role} something.".to_string());
        overrides.insert("greeting".to_string(), "unused".to_string());

        let prompts = PromptSet::default().with_overrides(&overrides);
        assert_eq!(
            prompts.render_question(&config(), &QuestionHistory::new()),
            "Ask a Marketing Manager something."
        );
        assert!(prompts
            .render_evaluation(&config(), "q", "a")
            .contains("Relevance (50%)"));
    }

    #[test]
    fn test_fill_leaves_unknown_and_substituted_braces_alone() {
        let out = fill("{answer} {unknown} {", &[("answer", "{role}")]);
        assert_eq!(out, "{role} {unknown} {");
    }
}
