use serde::{Deserialize, Serialize};

/// Per-traveler ticket state within a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelerStatus {
    Active,
    Canceled,
}

impl TravelerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelerStatus::Active => "Active",
            TravelerStatus::Canceled => "Canceled",
        }
    }

    /// Lenient query-parameter form: anything but the two known values
    /// (empty string included) means "no filter".
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Active" => Some(TravelerStatus::Active),
            "Canceled" => Some(TravelerStatus::Canceled),
            _ => None,
        }
    }
}

/// Links a person to a booking with their own PNR and cancellation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelerBooking {
    pub id: i64,
    pub booking_id: i64,
    pub person_id: i64,
    pub pnr: String,
    pub category: Option<String>,
    pub reason: Option<String>,
    pub status: TravelerStatus,
    pub refund_method: Option<String>,
    pub refund_notes: Option<String>,
}

/// Traveler payload as submitted on booking create.
#[derive(Debug, Clone, Deserialize)]
pub struct TravelerDraft {
    pub person_id: i64,
    pub pnr: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Traveler fields as submitted on edit. Status changes go through
/// their own operation, not this one.
#[derive(Debug, Clone, Deserialize)]
pub struct TravelerUpdate {
    pub pnr: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub refund_method: Option<String>,
    #[serde(default)]
    pub refund_notes: Option<String>,
}

/// Traveler row joined with the person's display name, as loaded for
/// detail views, aggregation, and reporting.
#[derive(Debug, Clone, Serialize)]
pub struct TravelerDetail {
    pub id: i64,
    pub person_id: i64,
    pub name: String,
    pub pnr: String,
    pub category: Option<String>,
    pub reason: Option<String>,
    pub status: TravelerStatus,
    pub refund_method: Option<String>,
    pub refund_notes: Option<String>,
}
