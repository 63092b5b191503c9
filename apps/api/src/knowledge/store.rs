//! Shared, swappable knowledge snapshot.
//!
//! A snapshot is immutable once built. Requests clone the current `Arc` and
//! work on it without holding any lock; a reload builds a new snapshot off to
//! the side and swaps the pointer.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::knowledge::loader::{load_from_path, LoadOutcome, LoadReport};
use crate::knowledge::models::KnowledgeBase;

#[derive(Debug)]
pub struct Snapshot {
    base: KnowledgeBase,
    report: LoadReport,
}

impl Snapshot {
    pub fn new(outcome: LoadOutcome) -> Self {
        Self {
            base: outcome.base,
            report: outcome.report,
        }
    }

    /// The loaded base, or `None` when the source could not be loaded.
    pub fn base(&self) -> Option<&KnowledgeBase> {
        (!self.report.is_failed()).then_some(&self.base)
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

#[cfg(test)]
impl Snapshot {
    /// A successfully loaded snapshot around an in-memory base.
    pub fn in_memory(base: KnowledgeBase) -> Self {
        Self {
            base,
            report: LoadReport {
                source: "memory".to_string(),
                loaded_at: chrono::Utc::now(),
                created_sample: false,
                load_error: None,
                diagnostics: Vec::new(),
            },
        }
    }
}

#[derive(Clone)]
pub struct KnowledgeHandle {
    path: PathBuf,
    current: Arc<RwLock<Arc<Snapshot>>>,
}

impl KnowledgeHandle {
    /// Loads `path` and wraps the result.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snapshot = Snapshot::new(load_from_path(&path));
        Self::with_snapshot(path, snapshot)
    }

    pub fn with_snapshot(path: impl Into<PathBuf>, snapshot: Snapshot) -> Self {
        Self {
            path: path.into(),
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-reads the source and swaps the snapshot in one step. Blocking.
    pub fn reload(&self) -> Arc<Snapshot> {
        let fresh = Arc::new(Snapshot::new(load_from_path(&self.path)));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&fresh);
        info!(
            "Knowledge base reloaded from {} ({} occupations)",
            fresh.report.source,
            fresh.base.occupations.len()
        );
        fresh
    }
}
