pub mod dates;
pub mod ranking;
pub mod scoring;
pub mod signal;
pub mod storage;
pub mod surface;
pub mod tracker;

pub use ranking::rank_events;
pub use scoring::{compute_match, Scorer, ScoringWeights};
pub use signal::{build_listening_signal, tally_recent_artists};
pub use storage::{InMemoryStorage, StorageBackend};
pub use tracker::{AddOutcome, EventTracker, TrackerKind};
