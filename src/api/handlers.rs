//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use tracing::debug;

use super::AppState;
use super::error::ApiError;
use super::types::{
    ChargingWindowQuery, ChargingWindowResponse, EnergyMixResponse, HealthResponse,
};
use crate::error::HoursError;
use crate::mix::ChargingHours;
use crate::service;

/// Returns per-day average fuel mix for today and the next two UTC days.
///
/// `GET /energy-mix` → 200 + `EnergyMixResponse` JSON
/// upstream failure → 500 + `ErrorResponse`
pub async fn get_energy_mix(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EnergyMixResponse>, ApiError> {
    let summary = service::energy_mix_summary(state.source(), state.now()).await?;
    debug!(days = summary.days.len(), "energy mix computed");
    Ok(Json(EnergyMixResponse::try_from(&summary)?))
}

/// Returns the cleanest `hours`-long window starting tomorrow.
///
/// `GET /optimal-charging-window?hours=3` → 200 + `ChargingWindowResponse` JSON
/// `GET /optimal-charging-window?hours=0` → 400 + `ErrorResponse` (no fetch)
/// upstream failure or no feasible window → 500 + `ErrorResponse`
pub async fn get_optimal_charging_window(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ChargingWindowResponse>, ApiError> {
    let Query(pairs) = query.map_err(|e| HoursError::MalformedQuery(e.body_text()))?;
    let query = ChargingWindowQuery::from_pairs(pairs)?;
    let hours = ChargingHours::parse(query.hours.as_deref())?;
    let window = service::optimal_charging_window(state.source(), state.now(), hours).await?;
    debug!(%window, "charging window computed");
    Ok(Json(ChargingWindowResponse::new(hours, &window)))
}

/// `GET /health` → 200 `{"status":"ok"}`
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
