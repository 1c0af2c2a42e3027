use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{
    ArtistRecord, AttendanceStats, CandidateEvent, EdmTrainEvent, ListeningSignal, MatchResult, Ranking,
    RecentlyPlayedItem, SpotifyArtist, TrackedEvent, ViewMode, WishlistStats,
};
use crate::services::dates::parse_local_date;
use crate::services::{build_listening_signal, rank_events, tally_recent_artists, EventTracker};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SignalRequest {
    pub artists: Vec<ArtistRecord>,
}

#[derive(Debug, Deserialize)]
pub struct RecentSignalRequest {
    pub plays: Vec<RecentlyPlayedItem>,
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Serialize)]
pub struct RecentSignalResponse {
    pub artists: Vec<ArtistRecord>,
    pub signal: ListeningSignal,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub signal: ListeningSignal,
    pub event: CandidateEvent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    #[serde(default)]
    pub signal: ListeningSignal,
    #[serde(default)]
    pub events: Vec<CandidateEvent>,
    /// Raw EDMTrain events, ranked after conversion alongside `events`
    #[serde(default)]
    pub edmtrain_events: Vec<EdmTrainEvent>,
    #[serde(default)]
    pub mode: ViewMode,
    /// Reference day as `YYYY-MM-DD`; the server's local date when absent
    #[serde(default)]
    pub today: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub today: Option<String>,
}

/// Reads an explicit reference day or falls back to the local calendar date
fn resolve_today(raw: Option<&str>) -> AppResult<NaiveDate> {
    match raw {
        Some(raw) => parse_local_date(raw),
        None => Ok(Local::now().date_naive()),
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Builds a listening signal from artist records
pub async fn build_signal(Json(request): Json<SignalRequest>) -> Json<ListeningSignal> {
    Json(build_listening_signal(&request.artists))
}

/// Tallies recently played artists, then builds the signal from them
pub async fn build_recent_signal(
    Json(request): Json<RecentSignalRequest>,
) -> Json<RecentSignalResponse> {
    let artists = tally_recent_artists(&request.plays, &request.artists);
    let signal = build_listening_signal(&artists);

    Json(RecentSignalResponse { artists, signal })
}

/// Scores a single event
pub async fn match_event(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Json<MatchResult> {
    Json(state.scorer.compute_match(&request.signal, &request.event))
}

/// Orders events for the requested view
pub async fn rank(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RankRequest>,
) -> AppResult<Json<Ranking>> {
    let today = resolve_today(request.today.as_deref())?;

    let mut events = request.events;
    events.extend(request.edmtrain_events.into_iter().map(CandidateEvent::from));

    tracing::info!(
        request_id = %request_id,
        event_count = events.len(),
        signal_labels = request.signal.len(),
        mode = ?request.mode,
        threshold = state.scorer.weights().admission_threshold,
        %today,
        "Ranking events"
    );

    let ranking = rank_events(&events, &request.signal, request.mode, today, &state.scorer);

    if !ranking.rejected.is_empty() {
        tracing::warn!(
            request_id = %request_id,
            rejected = ranking.rejected.len(),
            "Events skipped for unreadable dates"
        );
    }

    Ok(Json(ranking))
}

async fn add_tracked(
    tracker: &EventTracker,
    event: &CandidateEvent,
) -> AppResult<(StatusCode, Json<TrackedEvent>)> {
    let outcome = tracker.add(event, Utc::now()).await?;
    let status = if outcome.newly_added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.record)))
}

async fn find_tracked(
    tracker: &EventTracker,
    event_id: &str,
    collection: &str,
) -> AppResult<Json<TrackedEvent>> {
    tracker
        .get(event_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Event {} is not in the {}", event_id, collection)))
}

async fn remove_tracked(tracker: &EventTracker, event_id: &str, collection: &str) -> AppResult<StatusCode> {
    if tracker.remove(event_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Event {} is not in the {}", event_id, collection)))
    }
}

/// Get all wishlisted events
pub async fn get_wishlist(State(state): State<AppState>) -> AppResult<Json<Vec<TrackedEvent>>> {
    Ok(Json(state.wishlist.list().await?))
}

/// Add an event to the wishlist
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Json(event): Json<CandidateEvent>,
) -> AppResult<(StatusCode, Json<TrackedEvent>)> {
    add_tracked(&state.wishlist, &event).await
}

/// Get one wishlisted event
pub async fn get_wishlisted(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<TrackedEvent>> {
    find_tracked(&state.wishlist, &event_id, "wishlist").await
}

/// Remove an event from the wishlist
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<StatusCode> {
    remove_tracked(&state.wishlist, &event_id, "wishlist").await
}

pub async fn wishlist_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<WishlistStats>> {
    let today = resolve_today(query.today.as_deref())?;
    Ok(Json(state.wishlist.wishlist_stats(today).await?))
}

/// Get all attended events
pub async fn get_attendance(State(state): State<AppState>) -> AppResult<Json<Vec<TrackedEvent>>> {
    Ok(Json(state.attendance.list().await?))
}

/// Mark an event as attended
pub async fn mark_attended(
    State(state): State<AppState>,
    Json(event): Json<CandidateEvent>,
) -> AppResult<(StatusCode, Json<TrackedEvent>)> {
    add_tracked(&state.attendance, &event).await
}

pub async fn get_attended(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<TrackedEvent>> {
    find_tracked(&state.attendance, &event_id, "attendance history").await
}

pub async fn unmark_attended(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<StatusCode> {
    remove_tracked(&state.attendance, &event_id, "attendance history").await
}

pub async fn attendance_stats(State(state): State<AppState>) -> AppResult<Json<AttendanceStats>> {
    Ok(Json(state.attendance.attendance_stats().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_today_explicit() {
        let today = resolve_today(Some("2025-10-15")).unwrap();
        assert_eq!(today, NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());
    }

    #[test]
    fn test_resolve_today_rejects_malformed() {
        assert!(matches!(resolve_today(Some("tomorrow")), Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn test_rank_request_defaults() {
        let request: RankRequest = serde_json::from_str("{}").unwrap();
        assert!(request.signal.is_empty());
        assert!(request.events.is_empty());
        assert!(request.edmtrain_events.is_empty());
        assert_eq!(request.mode, ViewMode::Recommended);
        assert_eq!(request.today, None);
    }
}
