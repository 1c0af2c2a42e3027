use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CandidateEvent;

/// A wishlisted or attended event as persisted by the tracker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEvent {
    pub event_id: String,
    pub event_name: String,
    pub venue_name: String,
    pub date: String,
    /// When the user added it
    pub tracked_at: DateTime<Utc>,
    /// Line-up credits, b2b sets written as "A b2b B"
    pub artists: Vec<String>,
}

impl TrackedEvent {
    pub fn from_event(event: &CandidateEvent, tracked_at: DateTime<Utc>) -> Self {
        Self {
            event_id: event.id.clone(),
            event_name: event.name.clone(),
            venue_name: event.venue.name.clone(),
            date: event.date.clone(),
            tracked_at,
            artists: event.artists.iter().map(|a| a.credit()).collect(),
        }
    }
}

/// Wishlist summary relative to a reference day
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistStats {
    pub total: usize,
    pub upcoming: usize,
    pub past: usize,
    /// Oldest first
    pub events: Vec<TrackedEvent>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total: usize,
    pub favorite_venue: Option<String>,
    pub venue_counts: BTreeMap<String, usize>,
    /// Keyed like "Oct 2025"
    pub monthly_counts: BTreeMap<String, usize>,
    /// Most recent first
    pub events: Vec<TrackedEvent>,
}
