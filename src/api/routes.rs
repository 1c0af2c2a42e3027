use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{propagate_request_id, request_span};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(propagate_request_id))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Taste matching
        .route("/signal", post(handlers::build_signal))
        .route("/signal/recent", post(handlers::build_recent_signal))
        .route("/match", post(handlers::match_event))
        .route("/rank", post(handlers::rank))
        // Wishlist
        .route("/wishlist", get(handlers::get_wishlist).post(handlers::add_to_wishlist))
        .route("/wishlist/stats", get(handlers::wishlist_stats))
        .route(
            "/wishlist/:event_id",
            get(handlers::get_wishlisted).delete(handlers::remove_from_wishlist),
        )
        // Attendance
        .route("/attendance", get(handlers::get_attendance).post(handlers::mark_attended))
        .route("/attendance/stats", get(handlers::attendance_stats))
        .route(
            "/attendance/:event_id",
            get(handlers::get_attended).delete(handlers::unmark_attended),
        )
}
