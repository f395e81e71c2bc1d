//! Candidate selection for flight schedule lookups.
//!
//! The upstream lookup returns every operation of an ident over a window
//! of days, each in a loosely-shaped record where the departure time can
//! live under half a dozen names. Matching picks the single operation
//! closest to the date the user asked about, without doing any I/O.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::services::schedule;

/// Score for a candidate with no usable timestamp. Large enough to lose
/// to any real time difference while still being selectable when nothing
/// better exists.
const NO_TIMESTAMP_SCORE: i64 = 1_000_000_000_000;

/// One operation of a flight ident as the upstream lookup reports it.
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightCandidate {
    #[serde(default)]
    pub scheduled_out: Option<String>,
    #[serde(default)]
    pub scheduled_off: Option<String>,
    #[serde(default)]
    pub scheduled_departure: Option<String>,
    #[serde(default)]
    pub estimated_out: Option<String>,
    #[serde(default)]
    pub actual_out: Option<String>,
    #[serde(default)]
    pub filed_departure_time: Option<String>,
    #[serde(default)]
    pub scheduled_in: Option<String>,
    #[serde(default)]
    pub scheduled_on: Option<String>,
    #[serde(default)]
    pub origin: Option<AirportRef>,
    #[serde(default)]
    pub destination: Option<AirportRef>,
    #[serde(default)]
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    pub ident_icao: Option<String>,
}

/// Airport reference nested inside a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirportRef {
    #[serde(default)]
    pub code_iata: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl AirportRef {
    fn display_code(&self) -> Option<&str> {
        first_nonempty(&[self.code_iata.as_deref(), self.code.as_deref()])
    }
}

/// Departure-time accessors in priority order. The first non-empty field
/// decides the candidate's timestamp.
const DEPARTURE_FIELDS: [fn(&FlightCandidate) -> Option<&str>; 6] = [
    |c| c.scheduled_out.as_deref(),
    |c| c.scheduled_off.as_deref(),
    |c| c.scheduled_departure.as_deref(),
    |c| c.estimated_out.as_deref(),
    |c| c.actual_out.as_deref(),
    |c| c.filed_departure_time.as_deref(),
];

fn first_nonempty<'a>(values: &[Option<&'a str>]) -> Option<&'a str> {
    values
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
}

impl FlightCandidate {
    /// Best-available departure timestamp text, trying each known field
    /// name in turn.
    pub fn departure_text(&self) -> Option<&str> {
        DEPARTURE_FIELDS
            .iter()
            .find_map(|get| get(self).map(str::trim).filter(|s| !s.is_empty()))
    }

    fn departure_instant(&self) -> Option<NaiveDateTime> {
        self.departure_text().and_then(schedule::parse_timestamp)
    }

    /// Lower is better. Exact UTC date match beats any proximity score;
    /// candidates without a parseable timestamp come last.
    fn score(&self, target: NaiveDate) -> i64 {
        match self.departure_instant() {
            Some(instant) if instant.date() == target => 0,
            Some(instant) => {
                let noon = target.and_time(chrono::NaiveTime::MIN) + Duration::hours(12);
                (instant - noon).num_seconds().abs()
            }
            None => NO_TIMESTAMP_SCORE,
        }
    }
}

/// Picks the candidate whose departure is closest to `target`, favoring
/// an exact calendar-date match. Ties keep the earliest candidate in the
/// input. Returns `None` only for an empty list.
pub fn best_match(candidates: &[FlightCandidate], target: NaiveDate) -> Option<&FlightCandidate> {
    let mut best: Option<&FlightCandidate> = None;
    let mut best_score = i64::MAX;
    for candidate in candidates {
        let score = candidate.score(target);
        if score < best_score {
            best_score = score;
            best = Some(candidate);
        }
    }
    best
}

/// Segment-shaped view of a matched candidate, ready to prefill a form.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedFlight {
    pub flight_number: String,
    pub flight_date: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub sched_departure: Option<String>,
    pub sched_arrival: Option<String>,
    pub aircraft_type: Option<String>,
    pub airline: Option<String>,
}

impl MatchedFlight {
    /// Projects a candidate onto the segment shape. The departure and
    /// arrival here use only the gate/runway schedule pair; the wider
    /// fallback chain is for matching, not for what we store.
    pub fn from_candidate(candidate: &FlightCandidate, flight_number: &str, flight_date: &str) -> Self {
        let airline = candidate
            .operator
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| {
                candidate
                    .ident_icao
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.chars().take(3).collect())
            });
        Self {
            flight_number: flight_number.to_string(),
            flight_date: flight_date.to_string(),
            origin: candidate
                .origin
                .as_ref()
                .and_then(AirportRef::display_code)
                .map(str::to_string),
            destination: candidate
                .destination
                .as_ref()
                .and_then(AirportRef::display_code)
                .map(str::to_string),
            sched_departure: first_nonempty(&[
                candidate.scheduled_out.as_deref(),
                candidate.scheduled_off.as_deref(),
            ])
            .map(str::to_string),
            sched_arrival: first_nonempty(&[
                candidate.scheduled_in.as_deref(),
                candidate.scheduled_on.as_deref(),
            ])
            .map(str::to_string),
            aircraft_type: candidate
                .aircraft_type
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            airline,
        }
    }
}
