use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{
    CandidateEvent, DateRejection, ListeningSignal, RankedEvent, Ranking, ViewMode,
};
use crate::services::dates::{is_in_current_week, parse_local_date};
use crate::services::scoring::Scorer;
use crate::services::surface::{display_name, EventSurface};

/// An event whose date has been read, with its score attached
struct Dated<'a> {
    date: NaiveDate,
    event: &'a CandidateEvent,
    score: f64,
    is_recommended: bool,
}

impl Dated<'_> {
    fn into_ranked(self) -> RankedEvent {
        RankedEvent {
            event: self.event.clone(),
            display_name: display_name(self.event),
            score: self.score,
            is_recommended: self.is_recommended,
        }
    }
}

/// Orders events for display.
///
/// In `Recommended` mode admitted events come first and the rest follow, each
/// group by date. In `ThisWeek` mode only events from Monday to Sunday of the
/// week containing `today` are kept, by date, with no reordering by score.
///
/// Events with an unreadable date are left out and reported in
/// `Ranking::rejected`; the rest of the pass is unaffected. Repeated event ids
/// keep their first occurrence.
pub fn rank_events(
    events: &[CandidateEvent],
    signal: &ListeningSignal,
    mode: ViewMode,
    today: NaiveDate,
    scorer: &Scorer,
) -> Ranking {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut dated: Vec<Dated<'_>> = Vec::with_capacity(events.len());
    let mut rejected: Vec<DateRejection> = Vec::new();

    for event in events {
        if !seen.insert(event.id.as_str()) {
            tracing::debug!(event_id = %event.id, "Skipping duplicate event");
            continue;
        }

        let date = match parse_local_date(&event.date) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(event_id = %event.id, date = %event.date, "Rejecting event with unreadable date");
                rejected.push(DateRejection {
                    event_id: event.id.clone(),
                    date: event.date.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if mode == ViewMode::ThisWeek && !is_in_current_week(date, today) {
            continue;
        }

        let surface = EventSurface::from_event(event);
        let result = scorer.match_surface(signal, &surface, event.is_electronic_flagged);
        dated.push(Dated {
            date,
            event,
            score: result.score,
            is_recommended: result.is_recommended,
        });
    }

    let ordered: Vec<Dated<'_>> = match mode {
        ViewMode::Recommended => {
            let (mut recommended, mut other): (Vec<_>, Vec<_>) =
                dated.into_iter().partition(|d| d.is_recommended);
            recommended.sort_by_key(|d| d.date);
            other.sort_by_key(|d| d.date);

            tracing::debug!(
                recommended = recommended.len(),
                other = other.len(),
                rejected = rejected.len(),
                "Ranked events"
            );

            recommended.into_iter().chain(other).collect()
        }
        ViewMode::ThisWeek => {
            dated.sort_by_key(|d| d.date);
            tracing::debug!(
                this_week = dated.len(),
                rejected = rejected.len(),
                "Filtered events to current week"
            );
            dated
        }
    };

    Ranking {
        events: ordered.into_iter().map(Dated::into_ranked).collect(),
        rejected,
    }
}
