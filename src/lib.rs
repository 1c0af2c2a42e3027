//! Taste-matched EDM event recommendations.
//!
//! A listening history is reduced to a weighted `ListeningSignal`, every
//! candidate event is scored against it, and the events are ordered for
//! display. The `api` module serves the same operations over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
