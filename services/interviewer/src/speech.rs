use tokio::process::Command;

/// Speaks text by running an external program (`espeak`, `say`, ...) with the
/// text as its last argument. Playback is awaited so speech never overlaps the
/// next prompt.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    /// Parses a command line such as `espeak -s 150`. Returns `None` when blank.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Failures are logged and swallowed.
    pub async fn speak(&self, text: &str) {
        let result = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .kill_on_drop(true)
            .status()
            .await;

        match result {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::warn!("TTS command '{}' exited with {}", self.program, status),
            Err(e) => tracing::warn!("TTS error: failed to run '{}': {}", self.program, e),
        }
    }
}
