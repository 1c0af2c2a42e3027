use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::{AttendanceStats, CandidateEvent, TrackedEvent, WishlistStats};
use crate::services::dates::{month_label, parse_local_date};
use crate::services::storage::StorageBackend;

/// Which collection a tracker manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerKind {
    Wishlist,
    Attendance,
}

impl TrackerKind {
    pub fn storage_key(&self) -> &'static str {
        match self {
            TrackerKind::Wishlist => "ravepulse_wishlist_events",
            TrackerKind::Attendance => "ravepulse_attended_events",
        }
    }
}

/// Result of `EventTracker::add`
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub record: TrackedEvent,
    /// False when the event was already tracked
    pub newly_added: bool,
}

/// Repository of events the user saved or attended
///
/// The whole collection is one JSON array under the kind's storage key.
/// Writes are serialized so concurrent adds cannot drop each other.
pub struct EventTracker {
    storage: Arc<dyn StorageBackend>,
    kind: TrackerKind,
    write_lock: Mutex<()>,
}

impl EventTracker {
    pub fn new(storage: Arc<dyn StorageBackend>, kind: TrackerKind) -> Self {
        Self {
            storage,
            kind,
            write_lock: Mutex::new(()),
        }
    }

    /// All tracked events in insertion order. An unreadable stored document
    /// reads as empty.
    pub async fn list(&self) -> AppResult<Vec<TrackedEvent>> {
        self.load_records(false).await
    }

    /// Reads the stored collection. With `strict`, an unreadable document is
    /// an error so that writers never replace records they could not read.
    async fn load_records(&self, strict: bool) -> AppResult<Vec<TrackedEvent>> {
        let key = self.kind.storage_key();
        let Some(raw) = self.storage.load(key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) if strict => {
                tracing::error!(
                    key,
                    backend = self.storage.name(),
                    error = %e,
                    "Refusing to overwrite unreadable tracker records"
                );
                Err(e.into())
            }
            Err(e) => {
                tracing::warn!(
                    key,
                    backend = self.storage.name(),
                    error = %e,
                    "Ignoring unreadable tracker records"
                );
                Ok(Vec::new())
            }
        }
    }

    pub async fn get(&self, event_id: &str) -> AppResult<Option<TrackedEvent>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|r| r.event_id == event_id))
    }

    /// Tracks an event. Adding an event that is already tracked changes nothing.
    pub async fn add(&self, event: &CandidateEvent, at: DateTime<Utc>) -> AppResult<AddOutcome> {
        if event.id.trim().is_empty() {
            return Err(AppError::InvalidInput("Event id must not be empty".to_string()));
        }
        parse_local_date(&event.date)?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.load_records(true).await?;

        if let Some(existing) = records.iter().find(|r| r.event_id == event.id) {
            return Ok(AddOutcome {
                record: existing.clone(),
                newly_added: false,
            });
        }

        let record = TrackedEvent::from_event(event, at);
        records.push(record.clone());
        self.save(&records).await?;

        tracing::info!(kind = ?self.kind, event_id = %event.id, "Tracked event");
        Ok(AddOutcome {
            record,
            newly_added: true,
        })
    }

    /// Stops tracking an event; returns whether it was tracked
    pub async fn remove(&self, event_id: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_records(true).await?;

        let before = records.len();
        records.retain(|r| r.event_id != event_id);
        if records.len() == before {
            return Ok(false);
        }

        self.save(&records).await?;
        tracing::info!(kind = ?self.kind, event_id, "Untracked event");
        Ok(true)
    }

    /// Upcoming and past counts relative to `today`, oldest first
    pub async fn wishlist_stats(&self, today: NaiveDate) -> AppResult<WishlistStats> {
        let mut events = self.list().await?;
        sort_by_event_date(&mut events);

        let mut upcoming = 0;
        let mut past = 0;
        for date in events.iter().filter_map(|r| parse_local_date(&r.date).ok()) {
            if date >= today {
                upcoming += 1;
            } else {
                past += 1;
            }
        }

        Ok(WishlistStats {
            total: events.len(),
            upcoming,
            past,
            events,
        })
    }

    /// Per-venue and per-month counts, most recent event first
    pub async fn attendance_stats(&self) -> AppResult<AttendanceStats> {
        let mut events = self.list().await?;

        let mut venue_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut venue_order: Vec<&str> = Vec::new();
        let mut monthly_counts: BTreeMap<String, usize> = BTreeMap::new();

        for record in &events {
            let venue = record.venue_name.trim();
            if !venue.is_empty() {
                let count = venue_counts.entry(venue.to_string()).or_insert(0);
                if *count == 0 {
                    venue_order.push(venue);
                }
                *count += 1;
            }

            if let Ok(date) = parse_local_date(&record.date) {
                *monthly_counts.entry(month_label(date)).or_insert(0) += 1;
            }
        }

        // Highest count wins; ties go to the venue attended first
        let mut favorite_venue: Option<String> = None;
        let mut best = 0;
        for venue in venue_order {
            let count = venue_counts[venue];
            if count > best {
                best = count;
                favorite_venue = Some(venue.to_string());
            }
        }

        sort_by_event_date(&mut events);
        events.reverse();

        Ok(AttendanceStats {
            total: events.len(),
            favorite_venue,
            venue_counts,
            monthly_counts,
            events,
        })
    }

    async fn save(&self, records: &[TrackedEvent]) -> AppResult<()> {
        let raw = serde_json::to_string(records)?;
        self.storage.store(self.kind.storage_key(), raw).await
    }
}

/// Oldest first; records with unreadable dates go last
fn sort_by_event_date(records: &mut [TrackedEvent]) {
    records.sort_by_key(|r| match parse_local_date(&r.date) {
        Ok(date) => (false, Some(date)),
        Err(_) => (true, None),
    });
}
