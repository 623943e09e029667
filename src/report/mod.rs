//! Report rendering and storage.
//!
//! A report is created exactly once per successful analysis: the rendered
//! PDF bytes plus a copy of the metrics that produced it, keyed by a fresh
//! id. Reports are never mutated and live until the owning store is dropped.

pub mod chart;
pub mod pdf;
pub mod store;

pub use pdf::PdfReportRenderer;
pub use store::InMemoryReportStore;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::{PixelBuffer, SkinMetrics};

/// Errors raised while rendering or retrieving reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Document construction failed. No artifact is stored and no id issued.
    #[error("Report rendering failed: {0}")]
    Render(String),

    /// No report is stored under the requested id.
    #[error("Report not found: {0}")]
    NotFound(Uuid),

    /// A store lock was poisoned by a panicking writer.
    #[error("Report store lock poisoned")]
    LockPoisoned,
}

/// A stored analysis report. Immutable after creation.
#[derive(Debug, Clone)]
pub struct Report {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Copy of the metrics the report was rendered from.
    pub metrics: SkinMetrics,
    /// The rendered PDF document.
    pub pdf_bytes: Vec<u8>,
    /// Suggested download filename.
    pub filename: String,
}

/// Renders a metrics record into a binary document.
pub trait ReportRenderer: Send + Sync {
    /// Render the report for one analysis. All intermediate assets stay in
    /// memory; a failure leaves nothing behind.
    fn render(
        &self,
        metrics: &SkinMetrics,
        image: &PixelBuffer,
        recommendations: &[String],
    ) -> Result<Vec<u8>, ReportError>;
}

/// Keyed report storage.
///
/// `put` generates a fresh id, never reused; concurrent `put`s never collide
/// because ids come from the generation scheme rather than from coordination.
/// There is no update and no delete.
pub trait ReportStore: Send + Sync {
    fn put(&self, metrics: SkinMetrics, pdf_bytes: Vec<u8>) -> Result<Arc<Report>, ReportError>;

    fn get(&self, id: Uuid) -> Result<Arc<Report>, ReportError>;
}
