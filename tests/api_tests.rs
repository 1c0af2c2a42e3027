use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use ravepulse::api::{create_router, AppState};
use ravepulse::services::ScoringWeights;

fn create_test_server() -> TestServer {
    let state = AppState::default();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn techno_signal() -> Value {
    json!([
        { "label": "techno", "weight": 10 },
        { "label": "Charlotte de Witte", "weight": 5 }
    ])
}

fn create_test_events() -> Value {
    json!([
        {
            "id": "trance-night",
            "name": "Trance Night",
            "date": "2025-10-14",
            "artists": [{ "name": "Armin van Buuren" }],
            "genres": ["Trance"]
        },
        {
            "id": "kntxt",
            "name": "KNTXT",
            "date": "2025-10-18",
            "artists": [{ "name": "Charlotte de Witte" }],
            "genres": ["Techno", "Minimal Techno"]
        },
        {
            "id": "broken",
            "name": "Broken Date",
            "date": "10/16/2025",
            "artists": [],
            "genres": []
        },
        {
            "id": "next-week",
            "name": "",
            "date": "2025-10-21",
            "artists": [{ "name": "Amelie Lens" }],
            "genreTags": ["Techno"],
            "venue": { "name": "Public Works", "city": "San Francisco", "state": "CA" }
        }
    ])
}

fn ids(body: &Value) -> Vec<String> {
    body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event"]["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_generated_and_echoed() {
    let server = create_test_server();

    let response = server.get("/health").await;
    let generated = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let supplied = uuid::Uuid::new_v4().to_string();
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_str(&supplied).unwrap(),
        )
        .await;
    assert_eq!(response.header("x-request-id").to_str().unwrap(), supplied);
}

#[tokio::test]
async fn test_build_signal() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/signal")
        .json(&json!({
            "artists": [
                { "name": "Charlotte de Witte", "genres": ["belgian techno"], "occurrenceCount": 5 },
                { "name": "Fisher", "genres": ["tech house"], "playCount": 2 }
            ]
        }))
        .await;

    response.assert_status_ok();
    let signal: Vec<Value> = response.json();

    let weight = |label: &str| {
        signal
            .iter()
            .find(|e| e["label"].as_str().unwrap().eq_ignore_ascii_case(label))
            .map(|e| e["weight"].as_u64().unwrap())
    };
    assert_eq!(weight("Charlotte de Witte"), Some(5));
    assert_eq!(weight("belgian techno"), Some(5));
    assert_eq!(weight("Techno"), Some(1));
    assert_eq!(weight("Tech House"), Some(3));
    assert_eq!(signal[0]["label"], "Charlotte de Witte");
}

#[tokio::test]
async fn test_build_recent_signal() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/signal/recent")
        .json(&json!({
            "plays": [
                { "track": { "name": "Marea", "artists": [{ "id": "fa", "name": "Fred again.." }] } },
                { "track": { "name": "Delilah", "artists": [{ "id": "fa", "name": "Fred again.." }] } }
            ],
            "artists": [
                { "id": "fa", "name": "Fred again..", "genres": ["house", "edm"] }
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["artists"][0]["occurrenceCount"], 2);

    // "House" gets 1 from the catalog plus the raw genre's 2
    assert_eq!(body["signal"][0]["label"], "House");
    assert_eq!(body["signal"][0]["weight"], 3);
    assert_eq!(body["signal"][1]["label"], "Fred again..");
    assert_eq!(body["signal"][2]["label"], "edm");
    assert_eq!(body["signal"][2]["weight"], 2);
}

#[tokio::test]
async fn test_match_event() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/match")
        .json(&json!({
            "signal": techno_signal(),
            "event": create_test_events()[1]
        }))
        .await;

    response.assert_status_ok();
    let result: Value = response.json();
    assert_eq!(result["score"], 35.0);
    assert_eq!(result["isRecommended"], true);
}

#[tokio::test]
async fn test_rank_recommended_mode() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/rank")
        .json(&json!({
            "signal": techno_signal(),
            "events": create_test_events(),
            "mode": "recommended",
            "today": "2025-10-15"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(ids(&body), vec!["kntxt", "next-week", "trance-night"]);
    assert_eq!(body["events"][1]["displayName"], "Amelie Lens");
    assert_eq!(body["events"][2]["isRecommended"], false);
    assert_eq!(body["events"][2]["score"], 0.0);

    let rejected = body["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["eventId"], "broken");
}

#[tokio::test]
async fn test_rank_this_week_mode() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/rank")
        .json(&json!({
            "signal": techno_signal(),
            "events": create_test_events(),
            "mode": "thisWeek",
            "today": "2025-10-15"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["trance-night", "kntxt"]);
}

#[tokio::test]
async fn test_rank_empty_signal() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/rank")
        .json(&json!({
            "events": create_test_events(),
            "today": "2025-10-15"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["trance-night", "kntxt", "next-week"]);
    assert!(body["events"]
        .as_array()
        .unwrap()
        .iter()
        .all(|e| e["isRecommended"] == false));
}

#[tokio::test]
async fn test_rank_keeps_batch_when_dates_missing() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/rank")
        .json(&json!({
            "signal": techno_signal(),
            "events": [
                create_test_events()[1],
                { "id": "null-date", "name": "Null Date", "date": null },
                { "id": "no-date", "name": "No Date" }
            ],
            "today": "2025-10-15"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["kntxt"]);

    let rejected: Vec<&str> = body["rejected"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["eventId"].as_str().unwrap())
        .collect();
    assert_eq!(rejected, vec!["null-date", "no-date"]);
}

#[tokio::test]
async fn test_rank_accepts_edmtrain_events() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/rank")
        .json(&json!({
            "signal": [{ "label": "Adam Beyer", "weight": 4 }],
            "events": [create_test_events()[0]],
            "edmtrainEvents": [{
                "id": 9001,
                "name": null,
                "date": "2025-10-17",
                "venue": { "id": 12, "name": "Knockout Center", "location": "Brooklyn, NY" },
                "artistList": [
                    { "id": 1, "name": "Adam Beyer", "b2bInd": false },
                    { "id": 2, "name": "Cirez D", "b2bInd": true }
                ],
                "electronicGenreInd": true
            }],
            "mode": "thisWeek",
            "today": "2025-10-15"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["trance-night", "9001"]);

    let converted = &body["events"][1];
    assert_eq!(converted["isRecommended"], true);
    assert_eq!(converted["score"], 12.0);
    assert_eq!(converted["event"]["venue"]["city"], "Brooklyn");
    assert_eq!(converted["event"]["artists"][0]["b2bArtist"], "Cirez D");
}

#[tokio::test]
async fn test_rank_rejects_malformed_today() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/rank")
        .json(&json!({ "events": [], "today": "15/10/2025" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("15/10/2025"));
}

#[tokio::test]
async fn test_configured_threshold_applies() {
    let state = AppState::new(ScoringWeights {
        admission_threshold: 50.0,
        ..ScoringWeights::default()
    });
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server
        .post("/api/v1/match")
        .json(&json!({
            "signal": techno_signal(),
            "event": create_test_events()[1]
        }))
        .await;

    let result: Value = response.json();
    assert_eq!(result["score"], 0.0);
    assert_eq!(result["isRecommended"], false);
}

#[tokio::test]
async fn test_wishlist_flow() {
    let server = create_test_server();
    let event = create_test_events()[1].clone();

    let response = server.post("/api/v1/wishlist").json(&event).await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["eventId"], "kntxt");
    assert_eq!(created["artists"][0], "Charlotte de Witte");

    // Adding again is a no-op
    let response = server.post("/api/v1/wishlist").json(&event).await;
    response.assert_status_ok();

    let response = server.get("/api/v1/wishlist").await;
    response.assert_status_ok();
    let wishlist: Vec<Value> = response.json();
    assert_eq!(wishlist.len(), 1);

    let response = server.get("/api/v1/wishlist/kntxt").await;
    response.assert_status_ok();
    let record: Value = response.json();
    assert_eq!(record["eventName"], "KNTXT");

    let response = server.get("/api/v1/wishlist/trance-night").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .get("/api/v1/wishlist/stats")
        .add_query_param("today", "2025-10-20")
        .await;
    response.assert_status_ok();
    let stats: Value = response.json();
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["past"], 1);
    assert_eq!(stats["upcoming"], 0);

    let response = server.delete("/api/v1/wishlist/kntxt").await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.delete("/api/v1/wishlist/kntxt").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wishlist_rejects_malformed_date() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/wishlist")
        .json(&create_test_events()[2])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_attendance_flow() {
    let server = create_test_server();
    let events = create_test_events();

    for event in [&events[0], &events[1], &events[3]] {
        let response = server.post("/api/v1/attendance").json(event).await;
        response.assert_status(StatusCode::CREATED);
    }

    // Attendance is tracked separately from the wishlist
    let wishlist: Vec<Value> = server.get("/api/v1/wishlist").await.json();
    assert!(wishlist.is_empty());

    let response = server.get("/api/v1/attendance/stats").await;
    response.assert_status_ok();
    let stats: Value = response.json();
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["monthlyCounts"]["Oct 2025"], 3);
    assert_eq!(stats["favoriteVenue"], "Public Works");
    assert_eq!(stats["events"][0]["eventId"], "next-week");

    let response = server.get("/api/v1/attendance/trance-night").await;
    response.assert_status_ok();

    let response = server.delete("/api/v1/attendance/trance-night").await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get("/api/v1/attendance/trance-night").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let attended: Vec<Value> = server.get("/api/v1/attendance").await.json();
    assert_eq!(attended.len(), 2);
}
