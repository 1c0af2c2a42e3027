use serde::{Deserialize, Deserializer, Serialize};

pub mod event;
pub mod signal;
pub mod tracked;

pub use event::{CandidateEvent, EdmTrainArtist, EdmTrainEvent, EdmTrainVenue, EventArtist, Venue};
pub use signal::{
    ArtistRecord, ListeningSignal, PlayedTrack, RecentlyPlayedItem, SignalEntry, SimplifiedArtist,
    SpotifyArtist,
};
pub use tracked::{AttendanceStats, TrackedEvent, WishlistStats};

/// Outcome of scoring one event against a listening signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Raw score when admitted, otherwise 0
    pub score: f64,
    pub is_recommended: bool,
}

impl MatchResult {
    /// Result for an event that fell below the admission threshold
    pub fn rejected() -> Self {
        Self {
            score: 0.0,
            is_recommended: false,
        }
    }
}

/// Which list the caller is rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Recommended events first, then the rest, each chronological
    #[default]
    Recommended,
    /// Only events in the current Monday..Sunday week, chronological
    ThisWeek,
}

/// An event in its final display position
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedEvent {
    pub event: CandidateEvent,
    pub display_name: String,
    pub score: f64,
    pub is_recommended: bool,
}

/// An event left out of a ranking because its date could not be read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateRejection {
    pub event_id: String,
    pub date: String,
    pub reason: String,
}

/// Ordered output of a ranking pass
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct Ranking {
    pub events: Vec<RankedEvent>,
    pub rejected: Vec<DateRejection>,
}

/// Treats an explicit JSON `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
