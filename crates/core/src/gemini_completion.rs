use crate::completion::Completion;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Completion backend for the Gemini `generateContent` REST API.
pub struct GeminiCompletionClient {
    client: Client,
    api_key: SecretString,
    model: String,
}

impl GeminiCompletionClient {
    pub fn new(api_key: SecretString, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Completion for GeminiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{BASE_URL}/{}:generateContent", self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await
            .context("Gemini API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(anyhow::anyhow!(
                "Gemini API returned {status}: {}",
                error_message(&body_text)
            ));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        extract_text(parsed)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| anyhow::anyhow!("Gemini API returned no text in the response candidates"))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            match wrapper.error.status {
                Some(status) if !status.is_empty() => format!("{status}: {msg}"),
                _ => msg,
            }
        })
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_takes_first_text_part() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Tell me about lifetimes."}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "Tell me about lifetimes.");
    }

    #[test]
    fn test_extract_text_without_candidates_is_error() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(parsed).is_err());
    }

    #[test]
    fn test_error_message_prefers_api_status() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(error_message(body), "RESOURCE_EXHAUSTED: Quota exceeded");
        assert_eq!(error_message("gateway down"), "gateway down");
    }
}
