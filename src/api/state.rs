use std::sync::Arc;

use crate::services::{EventTracker, InMemoryStorage, Scorer, ScoringWeights, StorageBackend, TrackerKind};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scorer: Scorer,
    pub wishlist: Arc<EventTracker>,
    pub attendance: Arc<EventTracker>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl AppState {
    /// State backed by process-local storage
    pub fn new(weights: ScoringWeights) -> Self {
        Self::with_storage(weights, Arc::new(InMemoryStorage::new()))
    }

    /// State whose trackers persist through `storage`
    pub fn with_storage(weights: ScoringWeights, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            scorer: Scorer::new(weights),
            wishlist: Arc::new(EventTracker::new(storage.clone(), TrackerKind::Wishlist)),
            attendance: Arc::new(EventTracker::new(storage, TrackerKind::Attendance)),
        }
    }
}
