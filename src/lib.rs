#![deny(missing_docs)]

//! Core library for the Summarist document-summarisation service.

/// HTTP routing and the REST handler.
pub mod api;
/// Completion client abstraction and the OpenAI adapter.
pub mod completion;
/// Environment-driven configuration management.
pub mod config;
/// Embedding client abstraction and the OpenAI adapter.
pub mod embedding;
/// Structured logging and tracing setup.
pub mod logging;
/// Document summarisation pipeline utilities.
pub mod processing;
/// Embedding similarity helpers.
pub mod similarity;
