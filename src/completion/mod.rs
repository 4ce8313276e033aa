//! Abstractions for generating abstractive summaries via the completion API.
//!
//! The OpenAI-backed client issues one HTTP request per summary with fixed
//! sampling parameters; summary quality is entirely the provider's concern.

use crate::config::get_config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced while requesting an abstractive summary.
#[derive(Debug, Error)]
pub enum CompletionClientError {
    /// Provider could not be reached or rejected the credential.
    #[error("Completion provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
    /// Provider answered successfully but produced no usable text.
    #[error("Request to OpenAI API returned no summary.")]
    EmptySummary,
}

/// Request payload passed to the completion provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Fully qualified model identifier understood by the provider.
    pub model: String,
    /// Prompt assembled by the summarisation pipeline.
    pub prompt: String,
    /// Maximum token budget granted to the generated summary.
    pub max_tokens: u32,
}

/// Interface implemented by completion providers.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a summary using the configured model, trimmed of surrounding whitespace.
    async fn generate_summary(
        &self,
        request: CompletionRequest,
    ) -> Result<String, CompletionClientError>;
}

/// Build a completion client from the loaded configuration.
pub fn get_completion_client() -> Box<dyn CompletionClient + Send + Sync> {
    let config = get_config();
    Box::new(OpenAiCompletionClient::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
    ))
}

struct OpenAiCompletionClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompletionClient {
    fn new(base_url: String, api_key: String) -> Self {
        let http = Client::builder()
            .user_agent("summarist/completion")
            .build()
            .expect("Failed to construct reqwest::Client for completions");
        Self {
            http,
            base_url,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn generate_summary(
        &self,
        request: CompletionRequest,
    ) -> Result<String, CompletionClientError> {
        let payload = json!({
            "model": request.model,
            "prompt": request.prompt,
            "temperature": 0.7,
            "max_tokens": request.max_tokens,
            "top_p": 1.0,
            "frequency_penalty": 0.0,
            "presence_penalty": 1.0,
        });

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                CompletionClientError::ProviderUnavailable(format!(
                    "failed to reach OpenAI at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(CompletionClientError::ProviderUnavailable(format!(
                "OpenAI rejected the credential at {}; check OPENAI_API_KEY",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionClientError::GenerationFailed(format!(
                "OpenAI returned {status}: {body}"
            )));
        }

        let body: CompletionResponse = response.json().await.map_err(|error| {
            CompletionClientError::InvalidResponse(format!(
                "failed to decode completion response: {error}"
            ))
        })?;

        let summary = body
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionClientError::EmptySummary)?
            .text
            .trim()
            .to_string();

        if summary.is_empty() {
            return Err(CompletionClientError::EmptySummary);
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn test_client(base_url: String) -> OpenAiCompletionClient {
        OpenAiCompletionClient {
            http: Client::builder()
                .user_agent("summarist-test")
                .build()
                .expect("client"),
            base_url,
            api_key: "test-key".into(),
        }
    }

    fn test_request() -> CompletionRequest {
        CompletionRequest {
            model: "text-davinci-003".into(),
            prompt: "Summarise".into(),
            max_tokens: 250,
        }
    }

    #[tokio::test]
    async fn completion_client_trims_first_choice() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/completions")
                    .header("authorization", "Bearer test-key")
                    .json_body_partial(
                        r#"{"model": "text-davinci-003", "temperature": 0.7, "max_tokens": 250, "presence_penalty": 1.0}"#,
                    );
                then.status(200).json_body(json!({
                    "choices": [{ "text": "\n\nSummary text. " }]
                }));
            })
            .await;

        let summary = client
            .generate_summary(test_request())
            .await
            .expect("summary");

        mock.assert();
        assert_eq!(summary, "Summary text.");
    }

    #[tokio::test]
    async fn completion_client_reports_missing_choices() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let error = client
            .generate_summary(test_request())
            .await
            .expect_err("empty choices");

        assert!(matches!(error, CompletionClientError::EmptySummary));
    }

    #[tokio::test]
    async fn completion_client_reports_blank_text_as_empty() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/completions");
                then.status(200)
                    .json_body(json!({ "choices": [{ "text": "  \n " }] }));
            })
            .await;

        let error = client
            .generate_summary(test_request())
            .await
            .expect_err("blank summary");

        assert!(matches!(error, CompletionClientError::EmptySummary));
    }

    #[tokio::test]
    async fn completion_client_handles_error_status() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/completions");
                then.status(500).body("boom");
            })
            .await;

        let error = client
            .generate_summary(test_request())
            .await
            .expect_err("error response");

        assert!(
            matches!(error, CompletionClientError::GenerationFailed(message) if message.contains("500"))
        );
    }
}
