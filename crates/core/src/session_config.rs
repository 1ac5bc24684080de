use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

pub const DEFAULT_CANDIDATE_NAME: &str = "User";
pub const DEFAULT_ROLE_TITLE: &str = "Software Engineer";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:my name is|name is)\s+([^\s,]+)").expect("valid regex"));
static ROLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:job role is|role is)\s+(.+)").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Case-insensitive match on the level name; anything else is unrecognised.
    pub fn recognize(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InterviewStyle {
    #[default]
    Technical,
    NonTechnical,
}

impl InterviewStyle {
    pub fn recognize(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "technical" => Some(InterviewStyle::Technical),
            "non-technical" | "non technical" => Some(InterviewStyle::NonTechnical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStyle::Technical => "Technical",
            InterviewStyle::NonTechnical => "Non-technical",
        }
    }

    /// Lower-case label used inside prompts ("technical" / "non-technical").
    pub fn label(&self) -> &'static str {
        match self {
            InterviewStyle::Technical => "technical",
            InterviewStyle::NonTechnical => "non-technical",
        }
    }

    /// What questions of this style should concentrate on.
    pub fn focus(&self) -> &'static str {
        match self {
            InterviewStyle::Technical => {
                "technical (focusing on role-specific skills and knowledge)"
            }
            InterviewStyle::NonTechnical => {
                "non-technical (focusing on behavioral, leadership, or soft skills)"
            }
        }
    }
}

impl fmt::Display for InterviewStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How configuration answers (and interview answers) are captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    Voice,
}

impl InputMode {
    pub fn recognize(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "text" => Some(InputMode::Text),
            "voice" => Some(InputMode::Voice),
            _ => None,
        }
    }
}

/// Candidate configuration, fixed for the whole session once collected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionConfig {
    pub candidate_name: String,
    pub role_title: String,
    pub difficulty: Difficulty,
    pub interview_style: InterviewStyle,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            candidate_name: DEFAULT_CANDIDATE_NAME.to_string(),
            role_title: DEFAULT_ROLE_TITLE.to_string(),
            difficulty: Difficulty::default(),
            interview_style: InterviewStyle::default(),
        }
    }
}

fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}

/// Name typed on a line; blank or missing falls back to the default.
pub fn name_from_text(input: Option<&str>) -> String {
    non_blank(input)
        .unwrap_or(DEFAULT_CANDIDATE_NAME)
        .to_string()
}

/// Role typed on a line; blank or missing falls back to the default.
pub fn role_from_text(input: Option<&str>) -> String {
    non_blank(input).unwrap_or(DEFAULT_ROLE_TITLE).to_string()
}

/// Pulls a name out of a spoken phrase such as "hi, my name is Priya".
/// Without the phrase, the first word of the utterance is used.
pub fn name_from_speech(input: Option<&str>) -> String {
    let Some(utterance) = non_blank(input) else {
        return DEFAULT_CANDIDATE_NAME.to_string();
    };
    if let Some(caps) = NAME_PATTERN.captures(utterance) {
        return caps[1].to_string();
    }
    utterance
        .split_whitespace()
        .next()
        .unwrap_or(DEFAULT_CANDIDATE_NAME)
        .to_string()
}

/// Pulls a role out of a spoken phrase such as "my job role is data analyst".
/// Without the phrase, the whole utterance is the role.
pub fn role_from_speech(input: Option<&str>) -> String {
    let Some(utterance) = non_blank(input) else {
        return DEFAULT_ROLE_TITLE.to_string();
    };
    match ROLE_PATTERN.captures(utterance) {
        Some(caps) => caps[1].trim().to_string(),
        None => utterance.to_string(),
    }
}
