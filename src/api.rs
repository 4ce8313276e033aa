//! HTTP surface for the summarisation service.
//!
//! A single Axum route is exposed:
//!
//! - `POST /get-summarisation-data` – Summarise a document via the completion API and return the
//!   summary sentences and document paragraphs, each paired with an embedding vector.
//!
//! Failures map onto the two-tier error contract: input validation problems answer with
//! `422 Unprocessable Entity`, anything else with `500 Internal Server Error`; both carry a
//! JSON body of the form `{"detail": "<message>"}`.

use crate::processing::{SummarisationData, SummariseError, SummariserApi};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Build the HTTP router exposing the summarisation API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: SummariserApi + 'static,
{
    Router::new()
        .route("/get-summarisation-data", post(get_summarisation_data::<S>))
        .with_state(service)
}

/// Request body for the `POST /get-summarisation-data` endpoint.
#[derive(Deserialize)]
struct SummariseRequest {
    /// Raw document text to summarise and embed.
    document: String,
}

/// Summarise a document and annotate it with embeddings.
///
/// The handler validates nothing itself beyond JSON deserialization; length
/// checking and every downstream step live in the pipeline service.
async fn get_summarisation_data<S>(
    State(service): State<Arc<S>>,
    Json(request): Json<SummariseRequest>,
) -> Result<Json<SummarisationData>, AppError>
where
    S: SummariserApi,
{
    let data = service.summarise_document(request.document).await?;
    tracing::info!(
        summary_units = data.summary.len(),
        document_units = data.document.len(),
        "Summarisation request completed"
    );
    Ok(Json(data))
}

struct AppError(SummariseError);

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            SummariseError::DocumentTooLong { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.0.to_string();
        if status.is_server_error() {
            tracing::error!(%status, detail, "Summarisation request failed");
        } else {
            tracing::warn!(%status, detail, "Summarisation request rejected");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<SummariseError> for AppError {
    fn from(inner: SummariseError) -> Self {
        Self(inner)
    }
}
