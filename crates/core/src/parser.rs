//! Extraction of structured evaluation fields from free-form completion text.
//!
//! The completion service answers in prose. Every field is extracted
//! independently: from a JSON object when the whole reply is one, otherwise
//! by scanning `Field: value` lines, and finally from a fixed default. Parsing
//! never fails; the worst case is a result made entirely of defaults.

use crate::evaluation::EvaluationResult;
use serde_json::Value;

pub const DEFAULT_SCORE: f64 = 50.0;
pub const DEFAULT_FEEDBACK: &str = "Answer evaluated.";

const SCORE_MARKER: &str = "Score";
const FEEDBACK_MARKER: &str = "Feedback";
const SUGGESTIONS_MARKER: &str = "Suggestions";

pub fn default_suggestions(role_title: &str, difficulty: &str) -> String {
    format!("Ensure your answer is relevant to the {role_title} role and {difficulty} level.")
}

#[derive(Debug, Default, PartialEq)]
struct ExtractedFields {
    score: Option<f64>,
    feedback: Option<String>,
    suggestions: Option<String>,
}

impl ExtractedFields {
    fn or(self, fallback: ExtractedFields) -> ExtractedFields {
        ExtractedFields {
            score: self.score.or(fallback.score),
            feedback: self.feedback.or(fallback.feedback),
            suggestions: self.suggestions.or(fallback.suggestions),
        }
    }
}

/// Turns a raw evaluation reply into an [`EvaluationResult`].
///
/// The status is always recomputed from the final score; any status the
/// model wrote into its reply is ignored.
pub fn parse_evaluation(raw_text: &str, role_title: &str, difficulty: &str) -> EvaluationResult {
    let fields = extract_json(raw_text)
        .unwrap_or_default()
        .or(scan_lines(raw_text));

    if fields.score.is_none() {
        tracing::debug!("No usable score in evaluation reply; using default.");
    }

    EvaluationResult::new(
        fields.score.unwrap_or(DEFAULT_SCORE),
        fields
            .feedback
            .unwrap_or_else(|| DEFAULT_FEEDBACK.to_string()),
        fields
            .suggestions
            .unwrap_or_else(|| default_suggestions(role_title, difficulty)),
    )
}

fn scan_lines(raw_text: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::default();
    for line in raw_text.lines() {
        // One marker per line, checked in this order.
        if line.contains(SCORE_MARKER) {
            let after_last_colon = line.rsplit(':').next().unwrap_or(line);
            match first_number(after_last_colon).filter(|s| in_range(*s)) {
                Some(score) => fields.score = Some(score),
                None => tracing::warn!("Unusable score line in evaluation: {:?}", line),
            }
        } else if line.contains(FEEDBACK_MARKER) {
            if let Some(text) = after_first_colon(line) {
                fields.feedback = Some(text);
            }
        } else if line.contains(SUGGESTIONS_MARKER) {
            if let Some(text) = after_first_colon(line) {
                fields.suggestions = Some(text);
            }
        }
    }
    fields
}

fn after_first_colon(line: &str) -> Option<String> {
    let text = match line.split_once(':') {
        Some((_, rest)) => rest,
        None => line,
    };
    let text = text.trim().trim_matches('*').trim();
    (!text.is_empty()).then(|| text.to_string())
}

// First whitespace-separated token that parses as a number, tolerating
// markup and a "/100" suffix (e.g. "**85/100**").
fn first_number(text: &str) -> Option<f64> {
    text.split_whitespace().find_map(|token| {
        let token = token
            .split('/')
            .next()
            .unwrap_or(token)
            .trim_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'));
        token.parse::<f64>().ok().filter(|n| n.is_finite())
    })
}

fn in_range(score: f64) -> bool {
    (0.0..=100.0).contains(&score)
}

// "```json\n{...}\n```" -> "{...}"; anything else is only trimmed.
fn strip_code_fence(raw_text: &str) -> &str {
    let trimmed = raw_text.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    inner.strip_prefix("json").unwrap_or(inner).trim()
}

/// Reads the fields of a reply that is, in its entirety, a JSON object.
fn extract_json(raw_text: &str) -> Option<ExtractedFields> {
    let value: Value = serde_json::from_str(strip_code_fence(raw_text)).ok()?;
    let object = value.as_object()?;

    let score = ["total_score", "score"]
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => first_number(s),
            _ => None,
        })
        .filter(|s| in_range(*s));
    let text_field = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Some(ExtractedFields {
        score,
        feedback: text_field("feedback"),
        suggestions: text_field("suggestions"),
    })
}
