//! Analysis pipeline: decode -> metrics -> classify.
//!
//! The pipeline is synchronous, CPU-bound and stateless; every analysis is a
//! single attempt with no retries. [`SkinAnalyzer`] composes it with the
//! report renderer and store.

pub mod classify;
pub mod decode;
pub mod metrics;
mod orchestrator;
pub mod texture;
pub mod types;

pub use decode::PixelBuffer;
pub use orchestrator::{AnalysisOutcome, SkinAnalyzer};
pub use types::{SkinMetrics, SkinType, TextureMetrics};

use thiserror::Error;

use crate::report::ReportError;

/// Errors surfaced by the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Bad MIME type, undecodable bytes or an empty image. Surfaced to the
    /// caller immediately; never retried.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Report rendering or retrieval failure. When rendering fails no
    /// report id is issued.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}
