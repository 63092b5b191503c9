use crate::knowledge::store::KnowledgeHandle;
use crate::recommendation::advisor::Advisor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Current knowledge snapshot; swapped as a whole on reload.
    pub knowledge: KnowledgeHandle,
    /// Counselling text, model-backed when an API key is configured.
    pub advisor: Advisor,
}

#[cfg(test)]
impl AppState {
    /// State around an in-memory base, no model.
    pub fn for_tests(base: crate::knowledge::models::KnowledgeBase) -> Self {
        use crate::knowledge::store::Snapshot;

        Self {
            knowledge: KnowledgeHandle::with_snapshot("memory", Snapshot::in_memory(base)),
            advisor: Advisor::default(),
        }
    }
}
