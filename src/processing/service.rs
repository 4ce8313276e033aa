//! Summariser service coordinating the completion, segmentation, and embedding steps.

use crate::{
    completion::{CompletionClient, CompletionRequest, get_completion_client},
    config::get_config,
    embedding::{EmbeddingClient, get_embedding_client},
    processing::{
        prompt::{MAX_SUMMARY_TOKENS, build_summary_prompt, ensure_within_token_budget},
        segment::{split_paragraphs, split_summary_sentences},
        types::{SummarisationData, SummariseError, TextUnit},
    },
};
use async_trait::async_trait;

/// Coordinates the full summarisation pipeline: length validation, summary
/// generation, segmentation, and embedding.
///
/// The service owns long-lived handles to the completion and embedding clients
/// so every request reuses the same HTTP connections. Construct it once near
/// process start and share it through an `Arc`.
pub struct SummariserService {
    completion_client: Box<dyn CompletionClient + Send + Sync>,
    embedding_client: Box<dyn EmbeddingClient + Send + Sync>,
    summary_model: String,
}

/// Abstraction over the summarisation pipeline used by the HTTP surface.
#[async_trait]
pub trait SummariserApi: Send + Sync {
    /// Summarise a document and pair every summary sentence and document
    /// paragraph with its embedding.
    async fn summarise_document(
        &self,
        document: String,
    ) -> Result<SummarisationData, SummariseError>;
}

impl SummariserService {
    /// Build a new summariser service backed by the configured provider.
    pub fn new() -> Self {
        let config = get_config();
        tracing::info!(model = %config.summary_model, "Initializing provider clients");
        Self::with_clients(
            get_completion_client(),
            get_embedding_client(),
            config.summary_model.clone(),
        )
    }

    /// Build a service with explicit provider clients, bypassing configuration.
    pub fn with_clients(
        completion_client: Box<dyn CompletionClient + Send + Sync>,
        embedding_client: Box<dyn EmbeddingClient + Send + Sync>,
        summary_model: String,
    ) -> Self {
        Self {
            completion_client,
            embedding_client,
            summary_model,
        }
    }

    /// Run the summarisation pipeline over one document.
    ///
    /// The pipeline is strictly linear and aborts on the first failure:
    /// validate length, request the summary, segment it, then embed the
    /// summary sentences and document paragraphs. The two embedding batches
    /// are independent and run concurrently.
    pub async fn summarise_document(
        &self,
        document: String,
    ) -> Result<SummarisationData, SummariseError> {
        ensure_within_token_budget(&document)?;
        tracing::info!(document_chars = document.chars().count(), "Processing document");

        let summary = self
            .completion_client
            .generate_summary(CompletionRequest {
                model: self.summary_model.clone(),
                prompt: build_summary_prompt(&document),
                max_tokens: MAX_SUMMARY_TOKENS,
            })
            .await?;
        tracing::debug!(summary_chars = summary.chars().count(), "Summary received");

        let sentences = split_summary_sentences(&summary)?;
        let paragraphs = split_paragraphs(&document);

        let (sentence_embeddings, paragraph_embeddings) =
            tokio::try_join!(self.embed_units(&sentences), self.embed_units(&paragraphs))?;

        let data = SummarisationData {
            summary: assemble_units(sentences, sentence_embeddings),
            document: assemble_units(paragraphs, paragraph_embeddings),
        };
        tracing::info!(
            summary_units = data.summary.len(),
            document_units = data.document.len(),
            "Document summarised"
        );
        Ok(data)
    }

    /// Embed a batch of text units, verifying that the provider returned one
    /// vector per unit. An empty batch short-circuits without a provider call.
    async fn embed_units(&self, units: &[String]) -> Result<Vec<Vec<f32>>, SummariseError> {
        if units.is_empty() {
            return Ok(Vec::new());
        }
        let embeddings = self
            .embedding_client
            .generate_embeddings(units.to_vec())
            .await?;
        if embeddings.len() != units.len() {
            return Err(SummariseError::EmbeddingCountMismatch {
                expected: units.len(),
                actual: embeddings.len(),
            });
        }
        Ok(embeddings)
    }
}

/// Pair each text unit with the embedding at the same index.
fn assemble_units(texts: Vec<String>, embeddings: Vec<Vec<f32>>) -> Vec<TextUnit> {
    debug_assert_eq!(texts.len(), embeddings.len());
    texts
        .into_iter()
        .zip(embeddings)
        .map(|(text, embedding)| TextUnit { text, embedding })
        .collect()
}

#[async_trait]
impl SummariserApi for SummariserService {
    async fn summarise_document(
        &self,
        document: String,
    ) -> Result<SummarisationData, SummariseError> {
        SummariserService::summarise_document(self, document).await
    }
}
