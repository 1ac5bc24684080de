use crate::Command;
use async_trait::async_trait;

/// The runtime side of an interview: everything the session needs from the
/// outside world that is not the completion service.
///
/// None of these calls fail from the session's point of view. Capture
/// problems (timeouts, unintelligible audio, closed input) are reported as
/// `None`, and output problems are handled and logged by the implementation.
#[async_trait]
pub trait Frontend: Send + Sync {
    /// Shows and/or speaks a command to the candidate. Best effort.
    async fn dispatch(&self, command: Command);

    /// Line-based text entry.
    async fn read_line(&self, prompt: &str) -> Option<String>;

    /// Bounded-time speech capture, transcribed to text.
    async fn transcribe(&self, prompt: &str) -> Option<String>;
}
