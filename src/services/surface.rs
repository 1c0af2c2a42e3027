use crate::models::CandidateEvent;
use crate::services::dates::{parse_local_date, short_label};

/// Names event sources give to shows they have no title for
const PLACEHOLDER_NAMES: &[&str] = &["TBA", "EDM Event"];

/// Lowercased text of an event that scoring compares labels against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSurface {
    pub name: String,
    /// Every artist and b2b partner, one per entry, blanks removed
    pub artists: Vec<String>,
    /// All artist names space-joined
    pub artist_blob: String,
    /// All genre tags space-joined
    pub genre_blob: String,
}

impl EventSurface {
    pub fn from_event(event: &CandidateEvent) -> Self {
        let artists: Vec<String> = event
            .artists
            .iter()
            .flat_map(|a| a.names())
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        let genre_blob = event
            .genre_tags
            .iter()
            .map(|g| g.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            name: event.name.to_lowercase(),
            artist_blob: artists.join(" "),
            artists,
            genre_blob,
        }
    }
}

/// Whether the source left the event without a real title
pub fn has_placeholder_name(event: &CandidateEvent) -> bool {
    let name = event.name.trim();
    name.is_empty() || PLACEHOLDER_NAMES.contains(&name)
}

/// Title to show for an event.
///
/// Untitled events are shown by up to three of their artists, or failing that
/// by venue and date. This never feeds scoring.
pub fn display_name(event: &CandidateEvent) -> String {
    if !has_placeholder_name(event) {
        return event.name.clone();
    }

    let headliners: Vec<&str> = event
        .artists
        .iter()
        .map(|a| a.name.trim())
        .filter(|name| !name.is_empty() && *name != "TBA")
        .take(3)
        .collect();
    if !headliners.is_empty() {
        return headliners.join(" • ");
    }

    let venue = match event.venue.name.trim() {
        "" => "Event",
        name => name,
    };
    match parse_local_date(&event.date) {
        Ok(date) => format!("{} - {}", venue, short_label(date)),
        Err(_) => venue.to_string(),
    }
}
