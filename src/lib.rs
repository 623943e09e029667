//! Dermalens: single-image skin analysis engine.
//!
//! Raw image bytes go in; a structured [`SkinMetrics`] record, a rendered PDF
//! report and an opaque report id come out. The crate is transport-agnostic:
//! an HTTP front (or a CLI, or a test) hands bytes to [`SkinAnalyzer`] and
//! serves whatever it returns. Nothing here does network I/O and nothing
//! touches the filesystem; reports live in process memory for the lifetime
//! of the owning [`SkinAnalyzer`].

pub mod analysis;
pub mod config;
pub mod report;

pub use analysis::{AnalysisError, AnalysisOutcome, SkinAnalyzer};
pub use analysis::{SkinMetrics, SkinType, TextureMetrics};
pub use report::{InMemoryReportStore, Report, ReportError, ReportStore};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the hosting process.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate default.
/// Call once at startup; not needed for library use or tests.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
