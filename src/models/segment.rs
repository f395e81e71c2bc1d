use serde::{Deserialize, Serialize};

/// Default directional label applied when a segment arrives without one.
pub const DEFAULT_SEGMENT_GROUP: &str = "Outbound";

/// One flight leg of a booking.
///
/// The date/time fields are kept as the raw text they were entered or
/// fetched with: `sched_departure`/`sched_arrival` may be a full
/// timestamp, a bare time-of-day, or absent, and `flight_date` is the
/// calendar date that anchors them when no timestamp is available.
/// Reconciling those shapes is the job of `services::schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: i64,
    pub booking_id: i64,
    pub flight_number: String,
    pub flight_date: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub sched_departure: Option<String>,
    pub sched_arrival: Option<String>,
    pub airline: Option<String>,
    pub aircraft_type: Option<String>,
    pub segment_group: Option<String>,
}

/// Segment payload as submitted on booking create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentDraft {
    pub flight_number: String,
    pub flight_date: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub sched_departure: Option<String>,
    #[serde(default)]
    pub sched_arrival: Option<String>,
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub segment_group: Option<String>,
}

impl Segment {
    /// The directional group label, with the historical default applied.
    pub fn group_label(&self) -> &str {
        self.segment_group
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or(DEFAULT_SEGMENT_GROUP)
    }
}
