use anyhow::{Context, Result};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub content: String,
}

// The `Completion` trait is the single seam between the interview logic and the
// generative-language service. Question generation and answer evaluation only
// ever see prose coming back from `complete`; they never depend on a concrete
// provider, so tests swap in `MockCompletion` and the binary picks OpenAI or
// Gemini at startup.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Completion: Send + Sync {
    /// Sends one prompt and returns the model's unstructured text reply.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Talks to the OpenAI chat completions endpoint.
pub struct ChatCompletionClient {
    client: Client,
    api_key: SecretString,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(api_key: SecretString, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Completion for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "temperature": 0.7
        });

        let resp = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .context("Chat completion request failed")?
            .error_for_status()
            .context("Chat completion returned an error status")?
            .json::<LlmResponse>()
            .await
            .context("Failed to decode chat completion response")?;

        let answer = &resp
            .choices
            .first()
            .ok_or_else(|| anyhow::anyhow!("No response from LLM"))?
            .message
            .content;
        Ok(answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_decodes_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Score: 90"}}]}"#;
        let resp: LlmResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.choices[0].message.content, "Score: 90");
    }

    // This is an integration test that makes a live call to the OpenAI API.
    // It is ignored by default; run it with `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_live_question_completion() {
        dotenvy::dotenv_override().ok();
        let api_key = env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
        let client = ChatCompletionClient::new(SecretString::from(api_key), "gpt-4o".to_string());

        let text = client
            .complete("Generate a single, concise technical interview question for a Software Engineer role at a Beginner level.")
            .await
            .expect("completion failed");

        assert!(!text.trim().is_empty());
    }
}
