use serde::{Deserialize, Serialize};

use crate::models::{CandidateEvent, ListeningSignal, MatchResult};
use crate::services::surface::EventSurface;

/// Subgenre words that count when a label and an event share them
pub const SIGNIFICANT_KEYWORDS: &[&str] = &[
    "house",
    "techno",
    "trance",
    "dubstep",
    "bass",
    "drum",
    "trap",
    "hardstyle",
    "progressive",
    "deep",
    "future",
    "tech",
    "melodic",
    "minimal",
    "acid",
    "breaks",
    "garage",
    "jungle",
    "hardcore",
];

/// Label words that mark a generic electronic taste
const ELECTRONIC_MARKERS: &[&str] = &["edm", "electronic", "dance"];

/// Multipliers for each match tier and the admission threshold
///
/// All values must be non-negative; `Config::scoring_weights` enforces it for
/// values read from the environment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    pub admission_threshold: f64,
    pub genre_tag: f64,
    pub artist: f64,
    pub partial: f64,
    pub keyword: f64,
    pub electronic: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            admission_threshold: 3.0,
            genre_tag: 2.0,
            artist: 3.0,
            partial: 1.5,
            keyword: 0.8,
            electronic: 0.3,
        }
    }
}

/// Scores events against a listening signal
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Scores one event. Scores under the admission threshold come back as 0.
    pub fn compute_match(&self, signal: &ListeningSignal, event: &CandidateEvent) -> MatchResult {
        let surface = EventSurface::from_event(event);
        self.match_surface(signal, &surface, event.is_electronic_flagged)
    }

    /// Like `compute_match`, for callers that already hold the event surface
    pub fn match_surface(
        &self,
        signal: &ListeningSignal,
        surface: &EventSurface,
        is_electronic_flagged: bool,
    ) -> MatchResult {
        // No signal, no informed recommendation
        if signal.is_empty() {
            return MatchResult::rejected();
        }

        let raw: f64 = signal
            .iter()
            .map(|entry| {
                let label = entry.label.to_lowercase();
                self.label_score(&label, f64::from(entry.weight), surface, is_electronic_flagged)
            })
            .sum();

        if raw >= self.weights.admission_threshold && raw > 0.0 {
            MatchResult {
                score: raw,
                is_recommended: true,
            }
        } else {
            MatchResult::rejected()
        }
    }

    /// Contribution of a single lowercased label.
    ///
    /// The first three tiers are exclusive: the most specific one that fires
    /// is the only one counted. Keyword and electronic tiers only apply when
    /// none of them fired, and keyword hits add up per shared keyword.
    fn label_score(
        &self,
        label: &str,
        weight: f64,
        surface: &EventSurface,
        is_electronic_flagged: bool,
    ) -> f64 {
        let w = &self.weights;

        if surface.genre_blob.contains(label) {
            return weight * w.genre_tag;
        }

        let artist_hit = surface
            .artists
            .iter()
            .any(|artist| artist == label || artist.contains(label) || label.contains(artist.as_str()));
        if artist_hit {
            return weight * w.artist;
        }

        if surface.name.contains(label) || surface.artist_blob.contains(label) {
            return weight * w.partial;
        }

        let shared_keywords = SIGNIFICANT_KEYWORDS
            .iter()
            .filter(|kw| label.contains(*kw))
            .filter(|kw| surface.genre_blob.contains(*kw) || surface.name.contains(*kw))
            .count();
        let mut score = weight * w.keyword * shared_keywords as f64;

        if is_electronic_flagged && ELECTRONIC_MARKERS.iter().any(|m| label.contains(m)) {
            score += weight * w.electronic;
        }

        score
    }
}

/// Scores one event with the default weights
pub fn compute_match(signal: &ListeningSignal, event: &CandidateEvent) -> MatchResult {
    Scorer::default().compute_match(signal, event)
}
