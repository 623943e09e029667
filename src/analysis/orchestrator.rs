//! Analysis orchestrator.
//!
//! [`SkinAnalyzer`] wires the pipeline end to end: decode the bytes, extract
//! metrics, build recommendations, render the PDF, store the report. The
//! renderer and store are injected behind traits so hosting layers and tests
//! can swap backings without touching the pipeline.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::decode::PixelBuffer;
use super::types::SkinMetrics;
use super::{classify, metrics, AnalysisError};
use crate::report::{
    InMemoryReportStore, PdfReportRenderer, Report, ReportRenderer, ReportStore,
};

/// Result of one successful analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// The extracted metrics record.
    pub metrics: SkinMetrics,
    /// Id under which the rendered report was stored.
    pub report_id: Uuid,
}

/// Composes the analysis pipeline with a report renderer and store.
///
/// Shareable across threads; the store is the only shared mutable state.
pub struct SkinAnalyzer {
    renderer: Box<dyn ReportRenderer>,
    store: Arc<dyn ReportStore>,
}

impl SkinAnalyzer {
    pub fn new(renderer: Box<dyn ReportRenderer>, store: Arc<dyn ReportStore>) -> Self {
        Self { renderer, store }
    }

    /// Production analyzer: PDF renderer + in-memory store.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(PdfReportRenderer),
            Arc::new(InMemoryReportStore::new()),
        )
    }

    /// Run the full pipeline on raw image bytes.
    ///
    /// The MIME type must begin with `image/` and the bytes must decode into
    /// a non-empty image. On success the rendered report is stored and its
    /// id returned alongside the metrics; when rendering fails, no id is
    /// issued and nothing is stored.
    pub fn analyze(
        &self,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let buffer = PixelBuffer::decode(bytes, content_type)?;
        let metrics = metrics::extract(&buffer);
        let recommendations = classify::recommendations(&metrics);

        let pdf_bytes = self
            .renderer
            .render(&metrics, &buffer, &recommendations)?;
        let report = self.store.put(metrics.clone(), pdf_bytes)?;

        info!(
            report_id = %report.id,
            skin_type = %metrics.skin_type,
            spot_percentage = metrics.spot_percentage,
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            metrics,
            report_id: report.id,
        })
    }

    /// Retrieve a previously issued report by id.
    pub fn fetch_report(&self, id: Uuid) -> Result<Arc<Report>, AnalysisError> {
        Ok(self.store.get(id)?)
    }
}
