//! In-memory report store.
//!
//! A `RwLock<HashMap>` keyed by UUID: writes only on `put`, shared reads on
//! `get`. Reports are wrapped in `Arc` so retrieval hands out the stored
//! artifact without copying the PDF bytes.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::{Report, ReportError, ReportStore};
use crate::analysis::SkinMetrics;

/// Process-lifetime report storage. No eviction, no TTL.
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: RwLock<HashMap<Uuid, Arc<Report>>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports.
    pub fn len(&self) -> usize {
        self.reports.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportStore for InMemoryReportStore {
    fn put(&self, metrics: SkinMetrics, pdf_bytes: Vec<u8>) -> Result<Arc<Report>, ReportError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let filename = format!(
            "skin_analysis_report_{}_{}.pdf",
            created_at.format("%Y-%m-%d_%H-%M-%S"),
            &id.to_string()[..8],
        );

        let report = Arc::new(Report {
            id,
            created_at,
            metrics,
            pdf_bytes,
            filename,
        });

        self.reports
            .write()
            .map_err(|_| ReportError::LockPoisoned)?
            .insert(id, Arc::clone(&report));

        debug!(report_id = %id, bytes = report.pdf_bytes.len(), "Report stored");
        Ok(report)
    }

    fn get(&self, id: Uuid) -> Result<Arc<Report>, ReportError> {
        self.reports
            .read()
            .map_err(|_| ReportError::LockPoisoned)?
            .get(&id)
            .cloned()
            .ok_or(ReportError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{SkinType, TextureMetrics};

    fn sample_metrics() -> SkinMetrics {
        SkinMetrics {
            average_color: [100.0, 110.0, 120.0],
            spot_percentage: 0.03,
            texture: TextureMetrics {
                roughness: 8.0,
                pattern_uniformity: 0.02,
            },
            skin_type: SkinType::TypeIV,
            brightness: 110.0,
        }
    }

    #[test]
    fn put_then_get_returns_same_artifact_and_metadata() {
        let store = InMemoryReportStore::new();
        let stored = store.put(sample_metrics(), vec![1, 2, 3, 4]).unwrap();

        let fetched = store.get(stored.id).unwrap();
        assert_eq!(fetched.pdf_bytes, vec![1, 2, 3, 4]);
        assert_eq!(fetched.metrics, sample_metrics());
        assert_eq!(fetched.filename, stored.filename);
        assert_eq!(fetched.created_at, stored.created_at);
    }

    #[test]
    fn never_issued_id_is_not_found() {
        let store = InMemoryReportStore::new();
        store.put(sample_metrics(), vec![0]).unwrap();

        let missing = Uuid::new_v4();
        assert!(matches!(
            store.get(missing),
            Err(ReportError::NotFound(id)) if id == missing
        ));
    }

    #[test]
    fn filename_carries_id_prefix_and_pdf_extension() {
        let store = InMemoryReportStore::new();
        let stored = store.put(sample_metrics(), vec![0]).unwrap();

        assert!(stored.filename.starts_with("skin_analysis_report_"));
        assert!(stored.filename.ends_with(".pdf"));
        assert!(stored.filename.contains(&stored.id.to_string()[..8]));
    }

    #[test]
    fn each_put_gets_a_unique_id() {
        let store = InMemoryReportStore::new();
        let a = store.put(sample_metrics(), vec![0]).unwrap();
        let b = store.put(sample_metrics(), vec![0]).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn concurrent_puts_never_collide() {
        let store = Arc::new(InMemoryReportStore::new());

        let ids: Vec<Uuid> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let store = Arc::clone(&store);
                    s.spawn(move || store.put(sample_metrics(), vec![i as u8]).unwrap().id)
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(store.len(), ids.len());
        for id in ids {
            assert!(store.get(id).is_ok());
        }
    }

    #[test]
    fn gets_on_different_ids_do_not_interact() {
        let store = InMemoryReportStore::new();
        let a = store.put(sample_metrics(), vec![1]).unwrap();
        let b = store.put(sample_metrics(), vec![2]).unwrap();

        assert_eq!(store.get(a.id).unwrap().pdf_bytes, vec![1]);
        assert_eq!(store.get(b.id).unwrap().pdf_bytes, vec![2]);
    }
}
