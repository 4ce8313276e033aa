use crate::config::get_config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Errors raised by embedding providers.
#[derive(Debug, Error)]
pub enum EmbeddingClientError {
    /// Provider could not be reached or rejected the credential.
    #[error("Embedding provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider was unable to produce embeddings for the supplied input.
    #[error("Failed to generate embeddings: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by embedding backends.
#[async_trait]
pub trait EmbeddingClient {
    /// Produce an embedding vector for each supplied text, in input order.
    async fn generate_embeddings(
        &self,
        texts: Vec<String>,
    ) -> Result<Vec<Vec<f32>>, EmbeddingClientError>;
}

/// Build an embedding client from the loaded configuration.
pub fn get_embedding_client() -> Box<dyn EmbeddingClient + Send + Sync> {
    let config = get_config();
    Box::new(OpenAiEmbeddingClient::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.embedding_model.clone(),
    ))
}

struct OpenAiEmbeddingClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbeddingClient {
    fn new(base_url: String, api_key: String, model: String) -> Self {
        let http = Client::builder()
            .user_agent("summarist/embedding")
            .build()
            .expect("Failed to construct reqwest::Client for embeddings");
        Self {
            http,
            base_url,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/embeddings", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingClient for OpenAiEmbeddingClient {
    async fn generate_embeddings(
        &self,
        texts: Vec<String>,
    ) -> Result<Vec<Vec<f32>>, EmbeddingClientError> {
        tracing::debug!(model = %self.model, batch = texts.len(), "Generating embeddings");

        let payload = json!({
            "model": self.model,
            "input": texts,
        });

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                EmbeddingClientError::ProviderUnavailable(format!(
                    "failed to reach OpenAI at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(EmbeddingClientError::ProviderUnavailable(format!(
                "OpenAI rejected the credential at {}; check OPENAI_API_KEY",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingClientError::GenerationFailed(format!(
                "OpenAI returned {status}: {body}"
            )));
        }

        let mut body: EmbeddingResponse = response.json().await.map_err(|error| {
            EmbeddingClientError::InvalidResponse(format!(
                "failed to decode embedding response: {error}"
            ))
        })?;

        // The provider documents input order but the payload carries an index; honor it.
        body.data.sort_by_key(|item| item.index);
        Ok(body.data.into_iter().map(|item| item.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn test_client(base_url: String) -> OpenAiEmbeddingClient {
        OpenAiEmbeddingClient {
            http: Client::builder()
                .user_agent("summarist-test")
                .build()
                .expect("client"),
            base_url,
            api_key: "test-key".into(),
            model: "text-embedding-ada-002".into(),
        }
    }

    #[tokio::test]
    async fn embedding_client_returns_vectors_in_index_order() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/embeddings")
                    .header("authorization", "Bearer test-key")
                    .json_body_partial(
                        r#"{"model": "text-embedding-ada-002", "input": ["first", "second"]}"#,
                    );
                then.status(200).json_body(json!({
                    "data": [
                        { "index": 1, "embedding": [0.3, 0.4] },
                        { "index": 0, "embedding": [0.1, 0.2] }
                    ]
                }));
            })
            .await;

        let embeddings = client
            .generate_embeddings(vec!["first".into(), "second".into()])
            .await
            .expect("embeddings");

        mock.assert();
        assert_eq!(embeddings, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    }

    #[tokio::test]
    async fn embedding_client_handles_error_status() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/embeddings");
                then.status(429).body("rate limited");
            })
            .await;

        let error = client
            .generate_embeddings(vec!["first".into()])
            .await
            .expect_err("error response");

        assert!(
            matches!(error, EmbeddingClientError::GenerationFailed(message) if message.contains("429"))
        );
    }

    #[tokio::test]
    async fn embedding_client_rejects_malformed_payload() {
        let server = MockServer::start_async().await;
        let client = test_client(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/embeddings");
                then.status(200).body("not json");
            })
            .await;

        let error = client
            .generate_embeddings(vec!["first".into()])
            .await
            .expect_err("malformed response");

        assert!(matches!(error, EmbeddingClientError::InvalidResponse(_)));
    }
}
