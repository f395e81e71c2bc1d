// API module - Flight schedule lookup endpoint

use std::time::Duration;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::flight_lookup;
use crate::services::flight_match::MatchedFlight;
use crate::services::schedule;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LookupQuery {
    #[serde(default)]
    flight_number: String,
    #[serde(default)]
    flight_date: String,
}

#[derive(Debug, Serialize)]
struct LookupResponse {
    flight: MatchedFlight,
}

async fn lookup_flight(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<LookupResponse>> {
    let flight_number = query.flight_number.trim();
    let raw_date = query.flight_date.trim();
    if flight_number.is_empty() || raw_date.is_empty() {
        return Err(AppError::Validation(
            "flight_number and flight_date are required".to_string(),
        ));
    }

    // Accepts a bare date or a full timestamp; only the date part matters.
    let flight_date = schedule::parse_flight_date(raw_date).ok_or_else(|| {
        AppError::Validation("flight_date must be a YYYY-MM-DD date".to_string())
    })?;

    let api_key = state
        .config
        .aeroapi_key
        .as_ref()
        .ok_or(AppError::LookupNotConfigured)?;

    let flight = flight_lookup::lookup_flight(
        &state.config.aeroapi_base_url,
        api_key.expose_secret(),
        Duration::from_secs(state.config.lookup_timeout_secs),
        flight_number,
        flight_date,
    )
    .await?;

    Ok(Json(LookupResponse { flight }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/flight-lookup", get(lookup_flight))
}
