//! Document summarisation pipeline: validation, segmentation, and embedding orchestration.

mod prompt;
mod segment;
mod service;
pub mod types;

pub use service::{SummariserApi, SummariserService};
pub use types::{SegmentError, SummarisationData, SummariseError, TextUnit};
