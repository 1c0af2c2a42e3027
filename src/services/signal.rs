use std::collections::HashMap;

use crate::models::{ArtistRecord, ListeningSignal, RecentlyPlayedItem, SpotifyArtist};

/// Canonical EDM subgenres looked for inside provider genre strings
pub const EDM_SUBGENRES: &[&str] = &[
    "house",
    "techno",
    "trance",
    "dubstep",
    "drum and bass",
    "dnb",
    "hardstyle",
    "future bass",
    "trap",
    "progressive house",
    "deep house",
    "tech house",
    "melodic dubstep",
    "future house",
    "electro house",
    "big room",
    "tropical house",
    "bass house",
    "garage",
    "breakbeat",
    "hardcore",
    "ambient",
    "synthwave",
    "electronica",
    "psytrance",
    "minimal techno",
    "acid house",
    "uk garage",
    "riddim",
    "bass music",
    "liquid dnb",
    "neurofunk",
    "jump up",
    "darkstep",
    "drumstep",
    "future garage",
    "wave",
    "phonk",
    "midtempo",
    "leftfield bass",
];

/// Builds a listening signal from the user's artists.
///
/// Each artist contributes its own name and every raw genre, weighted by how
/// often the artist was played. Each subgenre found inside a raw genre string
/// adds 1 under its title-cased catalog name, so "deep house" and
/// "progressive deep house" both feed "House" and "Deep House".
///
/// Generic genres such as "edm" match no subgenre, so they only appear under
/// their own raw label.
pub fn build_listening_signal(artists: &[ArtistRecord]) -> ListeningSignal {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for artist in artists.iter().filter(|a| a.occurrence_count > 0) {
        let occurrences = artist.occurrence_count;
        counts.push((artist.name.clone(), occurrences));

        for genre in &artist.genres {
            let lowered = genre.to_lowercase();

            for subgenre in EDM_SUBGENRES.iter().filter(|s| lowered.contains(*s)) {
                counts.push((title_case(subgenre), 1));
            }

            counts.push((genre.clone(), occurrences));
        }
    }

    let signal = ListeningSignal::from_counts(counts);
    tracing::debug!(
        artist_count = artists.len(),
        label_count = signal.len(),
        top_label = signal.entries().first().map(|e| e.label.as_str()),
        "Built listening signal"
    );
    signal
}

/// Counts artist appearances in recently played tracks and joins them with
/// full artist data, most played first.
///
/// Artists without full data are skipped, since their genres are unknown.
pub fn tally_recent_artists(
    plays: &[RecentlyPlayedItem],
    artists: &[SpotifyArtist],
) -> Vec<ArtistRecord> {
    let mut play_counts: HashMap<&str, u32> = HashMap::new();
    for item in plays {
        for artist in &item.track.artists {
            *play_counts.entry(artist.id.as_str()).or_insert(0) += 1;
        }
    }

    let mut records: Vec<ArtistRecord> = Vec::new();
    let mut seen: Vec<&str> = Vec::new();
    for artist in artists {
        if seen.contains(&artist.id.as_str()) {
            continue;
        }
        if let Some(&count) = play_counts.get(artist.id.as_str()) {
            seen.push(artist.id.as_str());
            records.push(ArtistRecord {
                name: artist.name.clone(),
                genres: artist.genres.clone(),
                occurrence_count: count,
            });
        }
    }

    records.sort_by(|a, b| b.occurrence_count.cmp(&a.occurrence_count));
    records
}

/// "drum and bass" -> "Drum And Bass"
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
