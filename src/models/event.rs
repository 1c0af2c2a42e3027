use serde::{Deserialize, Serialize};

use super::null_as_default;

/// One live show as supplied by the event source
///
/// Optional collections default to empty so a sparse payload never fails to
/// deserialize. `date` stays as the raw `YYYY-MM-DD` text; it is only turned
/// into a calendar date by `services::dates::parse_local_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CandidateEvent {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Missing or null dates read as empty and are rejected when ranked
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<EventArtist>,
    #[serde(default, alias = "genres", deserialize_with = "null_as_default")]
    pub genre_tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub venue: Venue,
    #[serde(default, alias = "electronicGenreInd")]
    pub is_electronic_flagged: bool,
    #[serde(default)]
    pub ages: Option<String>,
    #[serde(default, alias = "festivalInd")]
    pub is_festival: bool,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub ticket_link: Option<String>,
}

/// A billed artist, optionally playing back-to-back with a partner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventArtist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub b2b_artist: Option<String>,
}

impl EventArtist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            b2b_artist: None,
        }
    }

    pub fn b2b(name: impl Into<String>, partner: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            b2b_artist: Some(partner.into()),
        }
    }

    /// The headliner followed by the back-to-back partner, if any
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.b2b_artist.as_deref())
    }

    /// Line-up credit as printed on a flyer, e.g. "Adam Beyer b2b Cirez D"
    pub fn credit(&self) -> String {
        match &self.b2b_artist {
            Some(partner) => format!("{} b2b {}", self.name, partner),
            None => self.name.clone(),
        }
    }
}

/// Venue location; carried through ranking but never scored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

// ============================================================================
// EDMTrain API Types
// ============================================================================

/// Raw event from the EDMTrain events endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdmTrainEvent {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub venue: EdmTrainVenue,
    #[serde(default)]
    pub artist_list: Vec<EdmTrainArtist>,
    #[serde(default)]
    pub ages: Option<String>,
    #[serde(default)]
    pub festival_ind: bool,
    #[serde(default)]
    pub electronic_genre_ind: bool,
    #[serde(default)]
    pub other_genre_ind: bool,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub ticket_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdmTrainVenue {
    pub id: u64,
    pub name: String,
    /// "City, ST" as EDMTrain formats it
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdmTrainArtist {
    pub id: u64,
    pub name: String,
    /// Set when this artist plays back-to-back with the one listed before it
    #[serde(default)]
    pub b2b_ind: bool,
}

impl From<EdmTrainVenue> for Venue {
    fn from(venue: EdmTrainVenue) -> Self {
        let mut parts = venue.location.splitn(2, ',');
        let city = parts
            .next()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Unknown City")
            .to_string();
        let state_from_location = parts.next().map(str::trim).unwrap_or_default().to_string();

        Venue {
            id: Some(venue.id.to_string()),
            name: venue.name,
            address: venue.address.unwrap_or_default(),
            city,
            state: venue
                .state
                .filter(|s| !s.is_empty())
                .unwrap_or(state_from_location),
            latitude: venue.latitude,
            longitude: venue.longitude,
        }
    }
}

impl From<EdmTrainEvent> for CandidateEvent {
    fn from(event: EdmTrainEvent) -> Self {
        let mut artists: Vec<EventArtist> = Vec::with_capacity(event.artist_list.len());

        for artist in event.artist_list {
            // Fold the partner into the previous slot so each set is one entry
            let pairs_with_previous =
                artist.b2b_ind && artists.last().is_some_and(|p| p.b2b_artist.is_none());

            if pairs_with_previous {
                if let Some(previous) = artists.last_mut() {
                    previous.b2b_artist = Some(artist.name);
                }
            } else {
                artists.push(EventArtist {
                    id: Some(artist.id.to_string()),
                    name: artist.name,
                    b2b_artist: None,
                });
            }
        }

        let ticket_link = event.ticket_link.or_else(|| event.link.clone());

        CandidateEvent {
            id: event.id.to_string(),
            name: event.name.unwrap_or_default(),
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            artists,
            genre_tags: Vec::new(),
            venue: event.venue.into(),
            is_electronic_flagged: event.electronic_genre_ind,
            ages: Some(event.ages.unwrap_or_else(|| "All Ages".to_string())),
            is_festival: event.festival_ind,
            link: event.link,
            ticket_link,
        }
    }
}
