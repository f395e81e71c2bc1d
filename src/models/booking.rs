use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::segment::Segment;
use super::traveler::{TravelerDetail, TravelerStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingType {
    Roundtrip,
    #[serde(rename = "One-way")]
    OneWay,
    #[serde(rename = "Multi-city")]
    MultiCity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Miles,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Miles => "Miles",
        }
    }
}

/// A purchased itinerary: one ticket transaction covering one or more
/// segments and one or more travelers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub booking_type: BookingType,
    pub payment_type: PaymentType,
    pub cost_cash: Option<f64>,
    pub cost_miles: Option<i64>,
    pub fees: Option<f64>,
    pub currency: String,
    pub fare_class: Option<String>,
    pub secondary_class: Option<String>,
    pub ticket_end: Option<String>,
    pub issued_on: Option<NaiveDate>,
}

/// Booking fields as submitted on create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingDraft {
    pub booking_type: BookingType,
    pub payment_type: PaymentType,
    #[serde(default)]
    pub cost_cash: Option<f64>,
    #[serde(default)]
    pub cost_miles: Option<i64>,
    #[serde(default)]
    pub fees: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub fare_class: Option<String>,
    #[serde(default)]
    pub secondary_class: Option<String>,
    #[serde(default)]
    pub ticket_end: Option<String>,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
}

impl BookingDraft {
    /// Cash bookings need a cash amount; award bookings need both miles
    /// and fees. Returns the violation message when the rule is broken.
    pub fn payment_rule_violation(&self) -> Option<&'static str> {
        match self.payment_type {
            PaymentType::Cash if self.cost_cash.is_none() => Some("Cash requires cost_cash"),
            PaymentType::Miles if self.cost_miles.is_none() || self.fees.is_none() => {
                Some("Miles requires cost_miles + fees")
            }
            _ => None,
        }
    }

    /// Currency code trimmed and uppercased, defaulting to USD.
    pub fn normalized_currency(&self) -> String {
        match self.currency.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_uppercase(),
            _ => "USD".to_string(),
        }
    }
}

/// A booking with its segments and traveler rows materialized together,
/// the input shape for aggregation and reporting.
#[derive(Debug, Clone, Serialize)]
pub struct BookingBundle {
    pub booking: Booking,
    pub segments: Vec<Segment>,
    pub travelers: Vec<TravelerDetail>,
}

impl BookingBundle {
    /// True iff at least one traveler on the booking has canceled.
    pub fn any_canceled(&self) -> bool {
        self.travelers
            .iter()
            .any(|t| t.status == TravelerStatus::Canceled)
    }
}
