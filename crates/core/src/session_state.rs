use crate::{
    Command,
    completion::Completion,
    evaluation::{AnswerEvaluator, EvaluationResult},
    frontend::Frontend,
    prompts::PromptSet,
    question::{DEFAULT_MAX_ATTEMPTS, Question, QuestionGenerator, QuestionHistory},
    session_config::{
        Difficulty, InputMode, InterviewStyle, SessionConfig, name_from_speech, name_from_text,
        role_from_speech, role_from_text,
    },
};
use serde::Serialize;
use std::time::Duration;

/// Number of question/answer turns in one session.
pub const DEFAULT_TURN_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    CollectingConfig,
    /// Running the zero-based turn.
    Looping(usize),
    Summarizing,
    Done,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub turn_count: usize,
    pub max_question_attempts: usize,
    pub turn_pause: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            turn_count: DEFAULT_TURN_COUNT,
            max_question_attempts: DEFAULT_MAX_ATTEMPTS,
            turn_pause: Duration::ZERO,
        }
    }
}

/// One completed turn. The evaluation of an absent answer is the fixed
/// no-response result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnRecord {
    pub question: Question,
    pub answer: Option<String>,
    pub evaluation: EvaluationResult,
}

/// Everything a finished session produced.
#[derive(Debug, Clone, Serialize)]
pub struct SessionTranscript {
    pub config: SessionConfig,
    pub turns: Vec<TurnRecord>,
}

impl SessionTranscript {
    pub fn correct_count(&self) -> usize {
        self.turns.iter().filter(|t| t.evaluation.is_correct()).count()
    }
}

pub struct InterviewSession {
    pub state: SessionState,
    settings: SessionSettings,
    prompts: PromptSet,
    mode: InputMode,
    config: SessionConfig,
    history: QuestionHistory,
    turns: Vec<TurnRecord>,
}

impl InterviewSession {
    pub fn new(settings: SessionSettings, prompts: PromptSet) -> Self {
        Self {
            state: SessionState::CollectingConfig,
            turns: Vec::with_capacity(settings.turn_count),
            settings,
            prompts,
            mode: InputMode::default(),
            config: SessionConfig::default(),
            history: QuestionHistory::new(),
        }
    }

    /// Runs the whole interview: configuration intake, the fixed number of
    /// turns, and the closing message. Consumes the session.
    pub async fn run<C, F>(mut self, completion: &C, frontend: &F) -> SessionTranscript
    where
        C: Completion + ?Sized,
        F: Frontend + ?Sized,
    {
        while self.state != SessionState::Done {
            self.advance(completion, frontend).await;
        }
        tracing::info!("Interview completed after {} turns.", self.turns.len());
        SessionTranscript {
            config: self.config,
            turns: self.turns,
        }
    }

    /// Does the work of the current state and moves to the next one.
    /// A finished session stays `Done`.
    pub async fn advance<C, F>(&mut self, completion: &C, frontend: &F) -> SessionState
    where
        C: Completion + ?Sized,
        F: Frontend + ?Sized,
    {
        let next = match self.state {
            SessionState::CollectingConfig => {
                self.config = self.collect_config(frontend).await;
                self.begin(frontend).await;
                self.turn_or_summary(0)
            }
            SessionState::Looping(turn) => {
                let config = self.config.clone();
                self.run_turn(turn, &config, completion, frontend).await;
                let next = self.turn_or_summary(turn + 1);
                if !self.settings.turn_pause.is_zero() && matches!(next, SessionState::Looping(_)) {
                    tokio::time::sleep(self.settings.turn_pause).await;
                }
                next
            }
            SessionState::Summarizing => {
                frontend
                    .dispatch(Command::SessionComplete(format!(
                        "Thank you, {}, for completing the interview for the {} role. Keep practicing to improve your answers!",
                        self.config.candidate_name, self.config.role_title
                    )))
                    .await;
                SessionState::Done
            }
            SessionState::Done => SessionState::Done,
        };
        tracing::debug!(from = ?self.state, to = ?next, "Session state changed.");
        self.state = next;
        next
    }

    fn turn_or_summary(&self, turn: usize) -> SessionState {
        if turn < self.settings.turn_count {
            SessionState::Looping(turn)
        } else {
            SessionState::Summarizing
        }
    }

    async fn begin<F: Frontend + ?Sized>(&self, frontend: &F) {
        let config = &self.config;
        tracing::info!(
            candidate = %config.candidate_name,
            role = %config.role_title,
            difficulty = %config.difficulty,
            style = %config.interview_style,
            "Configuration collected."
        );

        frontend
            .dispatch(Command::SpeakText(format!(
                "Let's begin the interview for {}. I will ask you a series of {} questions for a {} role at {} level. Please answer clearly.",
                config.candidate_name,
                config.interview_style.label(),
                config.role_title,
                config.difficulty
            )))
            .await;
    }

    async fn run_turn<C, F>(
        &mut self,
        turn: usize,
        config: &SessionConfig,
        completion: &C,
        frontend: &F,
    ) where
        C: Completion + ?Sized,
        F: Frontend + ?Sized,
    {
        let generator =
            QuestionGenerator::new(completion, &self.prompts, self.settings.max_question_attempts);
        let question = generator.generate(config, &mut self.history).await;
        tracing::debug!(turn, origin = ?question.origin, "Question ready.");

        frontend
            .dispatch(Command::AskQuestion {
                turn,
                candidate: config.candidate_name.clone(),
                question: question.text.clone(),
            })
            .await;

        let prompt = format!("Listening for your answer, {}...", config.candidate_name);
        let answer = self
            .capture(frontend, &prompt)
            .await
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let evaluator = AnswerEvaluator::new(completion, &self.prompts);
        let evaluation = evaluator
            .evaluate(&question.text, answer.as_deref(), config)
            .await;

        let command = if answer.is_some() {
            Command::TurnResult {
                turn,
                candidate: config.candidate_name.clone(),
                result: evaluation.clone(),
            }
        } else {
            Command::NoResponse {
                turn,
                candidate: config.candidate_name.clone(),
            }
        };
        tracing::info!(turn, score = evaluation.score, status = ?evaluation.status, "Turn finished.");

        self.turns.push(TurnRecord {
            question,
            answer,
            evaluation,
        });
        frontend.dispatch(command).await;
    }

    /// Gathers name, role, difficulty and style. Always succeeds; anything
    /// missing or unrecognised takes its default.
    pub async fn collect_config<F: Frontend + ?Sized>(&mut self, frontend: &F) -> SessionConfig {
        say(frontend, "Hello! I am your AI interviewer.").await;

        say(
            frontend,
            "Would you like to provide your details using text or voice? Please say 'text' or 'voice'.",
        )
        .await;
        let choice = frontend.transcribe("Listening for input method...").await;
        self.mode = match choice.as_deref().and_then(InputMode::recognize) {
            Some(mode) => mode,
            None => {
                tracing::warn!("Unrecognised input method {:?}; using text.", choice);
                say(frontend, "I couldn't catch that. I'll assume text input.").await;
                InputMode::Text
            }
        };

        let candidate_name = match self.mode {
            InputMode::Text => {
                say(frontend, "Please type your name.").await;
                name_from_text(frontend.read_line("Enter your name: ").await.as_deref())
            }
            InputMode::Voice => {
                say(frontend, "Please say your name.").await;
                name_from_speech(frontend.transcribe("Please say your name.").await.as_deref())
            }
        };

        say(
            frontend,
            &format!(
                "Nice to meet you, {candidate_name}! Please tell me your job role, for example, Software Engineer or Marketing Manager."
            ),
        )
        .await;
        let role_title = match self.mode {
            InputMode::Text => role_from_text(frontend.read_line("Enter your job role: ").await.as_deref()),
            InputMode::Voice => {
                role_from_speech(frontend.transcribe("Please say your job role.").await.as_deref())
            }
        };
        say(
            frontend,
            &format!("Got it, {candidate_name}, I'll tailor questions for a {role_title} role."),
        )
        .await;

        say(
            frontend,
            &format!(
                "What is your interview test level, {candidate_name}? Beginner, Intermediate, or Advanced?"
            ),
        )
        .await;
        let level = self.capture(frontend, "Test level: ").await;
        let difficulty = match level.as_deref().and_then(Difficulty::recognize) {
            Some(difficulty) => {
                say(
                    frontend,
                    &format!("Got it, {candidate_name}, I'll set the questions to {difficulty} level."),
                )
                .await;
                difficulty
            }
            None => {
                tracing::warn!("Unrecognised difficulty {:?}; using default.", level);
                let difficulty = Difficulty::default();
                say(
                    frontend,
                    &format!(
                        "I couldn't catch the level, {candidate_name}. I'll assume an {difficulty} level."
                    ),
                )
                .await;
                difficulty
            }
        };

        say(
            frontend,
            &format!("Would you like a technical or non-technical interview, {candidate_name}?"),
        )
        .await;
        let style = self.capture(frontend, "Interview type: ").await;
        let interview_style = match style.as_deref().and_then(InterviewStyle::recognize) {
            Some(interview_style) => {
                say(
                    frontend,
                    &format!("Got it, {candidate_name}, I'll set the interview to {interview_style}."),
                )
                .await;
                interview_style
            }
            None => {
                tracing::warn!("Unrecognised interview type {:?}; using default.", style);
                let interview_style = InterviewStyle::default();
                say(
                    frontend,
                    &format!(
                        "I couldn't catch the interview type, {candidate_name}. I'll assume a {interview_style} interview."
                    ),
                )
                .await;
                interview_style
            }
        };

        SessionConfig {
            candidate_name,
            role_title,
            difficulty,
            interview_style,
        }
    }

    /// Reads one input through the channel chosen at the start of the session.
    async fn capture<F: Frontend + ?Sized>(&self, frontend: &F, prompt: &str) -> Option<String> {
        match self.mode {
            InputMode::Text => frontend.read_line(prompt).await,
            InputMode::Voice => frontend.transcribe(prompt).await,
        }
    }
}

async fn say<F: Frontend + ?Sized>(frontend: &F, text: &str) {
    frontend.dispatch(Command::SpeakText(text.to_string())).await;
}
