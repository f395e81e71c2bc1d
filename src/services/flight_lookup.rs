use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

use crate::services::flight_match::{self, FlightCandidate, MatchedFlight};

/// How much upstream error body to keep when reporting a failure.
const ERROR_DETAIL_LIMIT: usize = 180;

#[derive(Error, Debug)]
pub enum FlightLookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("the configured lookup base URL is not usable")]
    BadBaseUrl,

    #[error("flight lookup failed (status {status}): {detail}")]
    Upstream { status: StatusCode, detail: String },

    #[error("no flights returned for this ident")]
    NoFlights,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    flights: Vec<FlightCandidate>,
}

/// Builds the schedule URL. The ident is pushed as one path segment,
/// so separators inside it cannot change which resource is requested.
fn lookup_url(base_url: &str, flight_number: &str) -> Result<Url, FlightLookupError> {
    let mut url = Url::parse(base_url).map_err(|_| FlightLookupError::BadBaseUrl)?;
    url.path_segments_mut()
        .map_err(|_| FlightLookupError::BadBaseUrl)?
        .pop_if_empty()
        .push("flights")
        .push(flight_number);
    url.set_query(Some("max_pages=1"));
    Ok(url)
}

/// Fetches the schedule for a flight ident and picks the operation
/// closest to `flight_date`.
///
/// One best-effort call, no retries. A timeout or connection failure
/// surfaces as `Http`; a non-success status as `Upstream`; an empty
/// candidate list as `NoFlights`.
#[tracing::instrument(skip(base_url, api_key, timeout))]
pub async fn lookup_flight(
    base_url: &str,
    api_key: &str,
    timeout: Duration,
    flight_number: &str,
    flight_date: NaiveDate,
) -> Result<MatchedFlight, FlightLookupError> {
    let url = lookup_url(base_url, flight_number)?;

    tracing::debug!(flight_number = %flight_number, date = %flight_date, "Looking up flight schedule");

    let client = Client::builder().timeout(timeout).build()?;
    let response = client
        .get(url)
        .header("x-apikey", api_key)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail: String = body.chars().take(ERROR_DETAIL_LIMIT).collect();
        tracing::error!(status = %status, detail = %detail, "Flight lookup request failed");
        return Err(FlightLookupError::Upstream { status, detail });
    }

    let payload: LookupResponse = response.json().await?;
    if payload.flights.is_empty() {
        tracing::info!(flight_number = %flight_number, "Lookup returned no flights");
        return Err(FlightLookupError::NoFlights);
    }

    let best = flight_match::best_match(&payload.flights, flight_date)
        .ok_or(FlightLookupError::NoFlights)?;

    tracing::info!(
        flight_number = %flight_number,
        candidates = payload.flights.len(),
        "Matched flight candidate"
    );

    Ok(MatchedFlight::from_candidate(
        best,
        flight_number,
        &flight_date.to_string(),
    ))
}
