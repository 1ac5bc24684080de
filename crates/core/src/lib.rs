pub mod completion;
pub mod evaluation;
pub mod frontend;
pub mod gemini_completion;
pub mod parser;
pub mod prompts;
pub mod question;
pub mod session_config;
pub mod session_state;

use crate::evaluation::EvaluationResult;

/// Represents commands that the core logic (`InterviewSession`) issues to the runtime.
///
/// This enum is the primary API for decoupling the session's decision-making
/// from the runtime's execution of side effects (printing, speaking text).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Say something to the candidate: greetings, prompts, notices.
    SpeakText(String),
    /// Present the question for the given zero-based turn.
    AskQuestion {
        turn: usize,
        candidate: String,
        question: String,
    },
    /// Present the evaluation of an answered turn.
    TurnResult {
        turn: usize,
        candidate: String,
        result: EvaluationResult,
    },
    /// No usable answer was captured for the turn.
    NoResponse { turn: usize, candidate: String },
    /// The session is complete, with a final message.
    SessionComplete(String),
}

impl Command {
    /// The text a speech backend should read out for this command.
    pub fn spoken_text(&self) -> String {
        match self {
            Command::SpeakText(text) | Command::SessionComplete(text) => text.clone(),
            Command::AskQuestion {
                turn,
                candidate,
                question,
            } => format!("Question {}, {candidate}: {question}", turn + 1),
            Command::TurnResult {
                candidate, result, ..
            } => format!("{candidate}, {}", result.summary()),
            Command::NoResponse { candidate, .. } => {
                format!("No valid response, {candidate}. Moving to next question.")
            }
        }
    }
}
