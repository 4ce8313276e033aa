//! Core data types and error definitions for the summarisation pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A segment of text (summary sentence or document paragraph) paired with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Text content of the segment.
    pub text: String,
    /// Embedding vector produced for the segment, in provider dimensionality.
    pub embedding: Vec<f32>,
}

/// Embedded summary sentences and document paragraphs assembled for one request.
///
/// Both lists preserve the order of the underlying text: the summary in the
/// order the sentences were written, the document in paragraph order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarisationData {
    /// Summary sentences with their embeddings.
    pub summary: Vec<TextUnit>,
    /// Document paragraphs with their embeddings.
    pub document: Vec<TextUnit>,
}

/// Errors produced while segmenting the generated summary.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Segmentation left no usable sentences to embed.
    #[error("Insufficient sentence count.")]
    NoSentences,
}

/// Errors emitted by the summarisation pipeline.
#[derive(Debug, Error)]
pub enum SummariseError {
    /// Document exceeded the approximate prompt-token budget.
    #[error("Document is too long.")]
    DocumentTooLong {
        /// Estimated token count of the submitted document.
        estimated: usize,
        /// Maximum number of prompt tokens accepted.
        limit: usize,
    },
    /// Completion provider failed to produce a summary.
    #[error("Failed to generate summary: {0}")]
    Completion(#[from] crate::completion::CompletionClientError),
    /// Generated summary could not be segmented into sentences.
    #[error("Failed to segment summary: {0}")]
    Segment(#[from] SegmentError),
    /// Embedding provider failed to produce vectors for the input text.
    #[error("Failed to generate embeddings: {0}")]
    Embedding(#[from] crate::embedding::EmbeddingClientError),
    /// Provider returned a different number of vectors than texts submitted.
    #[error("Embedding count mismatch: expected {expected}, got {actual}")]
    EmbeddingCountMismatch {
        /// Number of text units submitted for embedding.
        expected: usize,
        /// Number of vectors returned by the provider.
        actual: usize,
    },
}
