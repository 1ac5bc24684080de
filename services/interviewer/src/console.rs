use crate::speech::CommandSpeaker;
use async_trait::async_trait;
use interview_core::Command;
use interview_core::frontend::Frontend;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::sync::Mutex;

/// Terminal frontend: commands are written out (and optionally spoken),
/// answers are read line by line.
///
/// Voice capture is stood in for by a line read bounded by `listen_timeout`;
/// a timeout or closed input yields no answer.
pub struct ConsoleFrontend<R, W> {
    lines: Mutex<Lines<R>>,
    out: Mutex<W>,
    speaker: Option<CommandSpeaker>,
    listen_timeout: Duration,
}

impl ConsoleFrontend<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    pub fn stdio(speaker: Option<CommandSpeaker>, listen_timeout: Duration) -> Self {
        Self::new(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            speaker,
            listen_timeout,
        )
    }
}

impl<R, W> ConsoleFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W, speaker: Option<CommandSpeaker>, listen_timeout: Duration) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
            out: Mutex::new(writer),
            speaker,
            listen_timeout,
        }
    }

    pub fn into_writer(self) -> W {
        self.out.into_inner()
    }

    async fn write(&self, text: &str) {
        let mut out = self.out.lock().await;
        let result = async {
            out.write_all(text.as_bytes()).await?;
            out.flush().await
        }
        .await;
        if let Err(e) = result {
            tracing::warn!("Failed to write to console: {:?}", e);
        }
    }

    async fn next_line(&self) -> Option<String> {
        match self.lines.lock().await.next_line().await {
            Ok(Some(line)) => Some(line.trim().to_string()).filter(|l| !l.is_empty()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read input: {:?}", e);
                None
            }
        }
    }
}

fn render(command: &Command) -> String {
    match command {
        Command::SpeakText(text) => format!("{text}\n"),
        Command::AskQuestion {
            turn,
            candidate,
            question,
        } => format!("\nQuestion {} for {candidate}: {question}\n", turn + 1),
        Command::TurnResult { result, .. } => format!("{}\n", result.summary()),
        Command::NoResponse { candidate, .. } => {
            format!("No valid response from {candidate}. Moving to next question.\n")
        }
        Command::SessionComplete(message) => format!("{message}\nInterview completed.\n"),
    }
}

#[async_trait]
impl<R, W> Frontend for ConsoleFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn dispatch(&self, command: Command) {
        self.write(&render(&command)).await;
        if let Some(speaker) = &self.speaker {
            speaker.speak(&command.spoken_text()).await;
        }
    }

    async fn read_line(&self, prompt: &str) -> Option<String> {
        self.write(prompt).await;
        self.next_line().await
    }

    async fn transcribe(&self, prompt: &str) -> Option<String> {
        self.write(&format!("{prompt}\nListening...\n")).await;
        match tokio::time::timeout(self.listen_timeout, self.next_line()).await {
            Ok(Some(text)) => {
                self.write(&format!("You said: {text}\n")).await;
                Some(text)
            }
            Ok(None) => None,
            Err(_) => {
                tracing::warn!("No speech detected within {:?}.", self.listen_timeout);
                self.write("No speech detected. Please try again.\n").await;
                None
            }
        }
    }
}
