//! REST API for generation-mix summaries.
//!
//! Provides three GET endpoints:
//! - `/energy-mix`: per-day average fuel mix for today and the next two days
//! - `/optimal-charging-window?hours=N`: cleanest N-hour window in the lookahead
//! - `/health`: liveness probe

mod error;
mod handlers;
mod server;
mod types;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use chrono::{DateTime, Utc};

use crate::source::DataSource;

pub use error::ApiError;
pub use server::{ApiServer, ServerHandle};
pub use types::{
    ChargingWindowQuery, ChargingWindowResponse, DayAverages, EnergyMixResponse, ErrorResponse,
    OptimalWindow, Period,
};

/// Message returned for any rejected `hours` parameter.
pub const HOURS_ERROR_MESSAGE: &str = "Hours must be set between 1 and 6";

/// Body message for every upstream or computation failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application state shared across all request handlers.
///
/// Holds no request data; each request fetches and computes independently,
/// so no locks are needed.
pub struct AppState {
    source: Arc<dyn DataSource>,
    clock: fn() -> DateTime<Utc>,
}

impl AppState {
    /// State backed by `source`, reading the wall clock for "today".
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            clock: Utc::now,
        }
    }

    /// Replaces the wall clock, e.g. to pin "today" in tests.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/energy-mix", get(handlers::get_energy_mix))
        .route(
            "/optimal-charging-window",
            get(handlers::get_optimal_charging_window),
        )
        .route("/health", get(handlers::get_health))
        .with_state(state)
}
