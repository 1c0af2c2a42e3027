use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An artist from the user's listening history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    pub name: String,
    /// Free-text genres exactly as the provider returned them
    #[serde(default)]
    pub genres: Vec<String>,
    /// How many times the artist showed up in the history
    #[serde(default = "default_occurrence_count", alias = "playCount")]
    pub occurrence_count: u32,
}

fn default_occurrence_count() -> u32 {
    1
}

impl ArtistRecord {
    pub fn new(name: impl Into<String>, genres: &[&str], occurrence_count: u32) -> Self {
        Self {
            name: name.into(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            occurrence_count,
        }
    }
}

/// One weighted label (a genre or an artist name)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalEntry {
    pub label: String,
    pub weight: u32,
}

/// A user's taste as weighted labels, heaviest first
///
/// Labels are unique ignoring case and every weight is at least 1. Both hold
/// for values built through `from_counts` and for deserialized values, which
/// are aggregated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "Vec<SignalEntry>", into = "Vec<SignalEntry>")]
pub struct ListeningSignal {
    entries: Vec<SignalEntry>,
}

impl ListeningSignal {
    /// Aggregates `(label, weight)` pairs into a signal.
    ///
    /// Duplicate labels (case-insensitive) are summed under the first spelling
    /// seen. Blank labels and zero totals are dropped. The result is sorted by
    /// weight descending; equal weights keep their first-seen order.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<SignalEntry> = Vec::new();

        for (label, weight) in counts {
            let label: String = label.into();
            let trimmed = label.trim();
            if trimmed.is_empty() {
                continue;
            }

            let key = trimmed.to_lowercase();
            match index.get(&key) {
                Some(&i) => entries[i].weight = entries[i].weight.saturating_add(weight),
                None => {
                    index.insert(key, entries.len());
                    entries.push(SignalEntry {
                        label: trimmed.to_string(),
                        weight,
                    });
                }
            }
        }

        entries.retain(|e| e.weight > 0);
        entries.sort_by(|a, b| b.weight.cmp(&a.weight));

        Self { entries }
    }

    pub fn entries(&self) -> &[SignalEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight for a label, ignoring case
    #[cfg(test)]
    pub(crate) fn weight_of(&self, label: &str) -> Option<u32> {
        let key = label.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.label.to_lowercase() == key)
            .map(|e| e.weight)
    }
}

impl From<Vec<SignalEntry>> for ListeningSignal {
    fn from(entries: Vec<SignalEntry>) -> Self {
        Self::from_counts(entries.into_iter().map(|e| (e.label, e.weight)))
    }
}

impl From<ListeningSignal> for Vec<SignalEntry> {
    fn from(signal: ListeningSignal) -> Self {
        signal.entries
    }
}

// ============================================================================
// Spotify Web API Types
// ============================================================================

/// Full artist object from `GET /v1/artists`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Artist reference embedded in a track
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimplifiedArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayedTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

/// One item from `GET /v1/me/player/recently-played`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentlyPlayedItem {
    pub track: PlayedTrack,
}
