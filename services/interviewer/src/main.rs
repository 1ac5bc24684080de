use anyhow::{Context, Result};
use clap::Parser;
use interview_core::completion::{ChatCompletionClient, Completion};
use interview_core::gemini_completion::GeminiCompletionClient;
use interview_core::session_state::InterviewSession;
use interviewer_service::cli::Cli;
use interviewer_service::config::{CompletionProvider, Config};
use interviewer_service::console::ConsoleFrontend;
use interviewer_service::prompt_loader;
use interviewer_service::speech::CommandSpeaker;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Parse Command-Line Arguments ---
    let args = Cli::parse();

    // --- 2. Load Configuration ---
    let config = Config::from_env().context("Failed to load application configuration")?;

    // --- 3. Initialize Logging ---
    // Logs go to stderr so they do not interleave with the interview on stdout.
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Configuration loaded successfully. Starting interviewer...");

    let settings = args.apply(config.session_settings())?;

    // --- 4. Load Prompts ---
    let prompts_dir = args.prompts.or_else(|| config.prompts_dir.clone());
    let prompts = prompt_loader::prompt_set(prompts_dir.as_deref())
        .context("Failed to load LLM prompts")?;

    // --- 5. Initialize API Clients ---
    let completion: Box<dyn Completion> = match config.provider {
        CompletionProvider::OpenAI => Box::new(ChatCompletionClient::new(
            config.api_key,
            config.chat_model.clone(),
        )),
        CompletionProvider::Gemini => Box::new(GeminiCompletionClient::new(
            config.api_key,
            config.chat_model.clone(),
        )),
    };
    tracing::info!(
        "Using {:?} completion provider with model '{}'.",
        config.provider,
        config.chat_model
    );

    // --- 6. Frontend ---
    let speaker = config.speak_command.as_deref().and_then(CommandSpeaker::parse);
    if let Some(speaker) = &speaker {
        tracing::info!("Speaking output with {:?}", speaker);
    }
    let frontend = ConsoleFrontend::stdio(speaker, config.listen_timeout);

    // --- 7. Run the Interview ---
    let session = InterviewSession::new(settings, prompts);
    let transcript = tokio::select! {
        transcript = session.run(completion.as_ref(), &frontend) => transcript,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl-C, shutting down...");
            return Ok(());
        }
    };

    tracing::info!(
        "Session finished: {} of {} answers marked correct.",
        transcript.correct_count(),
        transcript.turns.len()
    );
    tracing::debug!("Transcript: {}", serde_json::to_string(&transcript)?);
    Ok(())
}
