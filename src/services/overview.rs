//! Booking overview rows for the list and calendar presentations.
//!
//! One row per (booking, directional group, traveler). The same row set
//! backs both presentations; the calendar just buckets rows by day and
//! drops the ones with no resolvable departure. Everything here is a
//! pure function of the loaded bundles, the filter, and the caller's
//! idea of "today", which the handlers supply per call.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::{Booking, BookingBundle, BookingType, PaymentType, TravelerStatus};
use crate::services::{airlines, itinerary, schedule};

/// Filter set for the overview. `today` is deliberately not part of it;
/// the caller supplies that per call.
#[derive(Debug, Clone, Default)]
pub struct OverviewFilter {
    pub q: Option<String>,
    pub status: Option<TravelerStatus>,
    pub person_id: Option<i64>,
    pub show_flown: bool,
}

/// Row-level status badge. A traveler's own cancellation outranks the
/// booking-level "some other traveler canceled" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Has canceled")]
    HasCanceled,
    Canceled,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewRow {
    pub booking_id: i64,
    pub booking_type: BookingType,
    pub trip_label: String,
    pub route: String,
    pub segment_summary: String,
    pub person_id: i64,
    pub traveler: String,
    pub pnr: String,
    pub airline: Option<String>,
    pub first_departure: Option<NaiveDateTime>,
    pub payment: String,
    pub status: RowStatus,
}

/// Human-readable payment line. Missing amounts render as "N/A", they
/// are never coerced to zero here.
pub fn payment_display(booking: &Booking) -> String {
    match booking.payment_type {
        PaymentType::Cash => match booking.cost_cash {
            Some(amount) => format!("{:.2} {}", amount, booking.currency),
            None => "N/A".to_string(),
        },
        PaymentType::Miles => {
            let miles = booking
                .cost_miles
                .map(|m| m.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            let fees = booking
                .fees
                .map(|f| format!("{:.2} {}", f, booking.currency))
                .unwrap_or_else(|| "N/A".to_string());
            format!("{} miles + {} fees", miles, fees)
        }
    }
}

/// Builds the filtered, ordered overview rows.
///
/// Status and free-text filtering are booking-level: a canceled-status
/// mismatch or a query miss drops every row of that booking. The person
/// filter and the flown cutoff are row-level. Rows order by first
/// departure ascending with unknown departures last.
pub fn overview_rows(
    bundles: Vec<BookingBundle>,
    filter: &OverviewFilter,
    today: NaiveDate,
) -> Vec<OverviewRow> {
    let query = filter
        .q
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    let day_start = today.and_time(NaiveTime::MIN);

    let mut rows = Vec::new();
    for bundle in bundles {
        let any_canceled = bundle.any_canceled();
        match filter.status {
            Some(TravelerStatus::Active) if any_canceled => continue,
            Some(TravelerStatus::Canceled) if !any_canceled => continue,
            _ => {}
        }

        if let Some(query) = &query {
            if !search_blob(&bundle).contains(query.as_str()) {
                continue;
            }
        }

        let booking = &bundle.booking;
        for group in itinerary::group_segments(bundle.segments.clone()) {
            let route = itinerary::route_label(&group.segments);
            let segment_summary = itinerary::segment_summary(&group.segments);
            let first_departure = group.segments.first().and_then(schedule::departure_instant);
            let airline = group
                .segments
                .first()
                .and_then(|s| s.airline.as_deref())
                .map(airlines::display_name);
            let trip_label = match booking.booking_type {
                BookingType::Roundtrip => group.label.clone(),
                _ => "Trip".to_string(),
            };

            for traveler in &bundle.travelers {
                if let Some(person_id) = filter.person_id {
                    if traveler.person_id != person_id {
                        continue;
                    }
                }
                if !filter.show_flown {
                    if let Some(departure) = first_departure {
                        if departure < day_start {
                            continue;
                        }
                    }
                }
                let status = if traveler.status == TravelerStatus::Canceled {
                    RowStatus::Canceled
                } else if any_canceled {
                    RowStatus::HasCanceled
                } else {
                    RowStatus::Ok
                };
                rows.push(OverviewRow {
                    booking_id: booking.id,
                    booking_type: booking.booking_type,
                    trip_label: trip_label.clone(),
                    route: route.clone(),
                    segment_summary: segment_summary.clone(),
                    person_id: traveler.person_id,
                    traveler: traveler.name.clone(),
                    pnr: traveler.pnr.clone(),
                    airline: airline.clone(),
                    first_departure,
                    payment: payment_display(booking),
                    status,
                });
            }
        }
    }

    rows.sort_by_key(|row| {
        (
            row.first_departure.is_none(),
            row.first_departure
                .map(|dt| dt.and_utc().timestamp())
                .unwrap_or(0),
        )
    });
    rows
}

/// Buckets rows by the calendar date of their first departure. Rows
/// with no resolvable departure have nowhere to go and are dropped.
pub fn calendar_days(rows: Vec<OverviewRow>) -> BTreeMap<NaiveDate, Vec<OverviewRow>> {
    let mut days: BTreeMap<NaiveDate, Vec<OverviewRow>> = BTreeMap::new();
    for row in rows {
        if let Some(departure) = row.first_departure {
            days.entry(departure.date()).or_default().push(row);
        }
    }
    days
}

/// Lowercased haystack the free-text query is matched against: id,
/// route, flight numbers and airports, traveler names, PNRs, reasons.
fn search_blob(bundle: &BookingBundle) -> String {
    let mut segments = bundle.segments.clone();
    itinerary::sort_chronologically(&mut segments);
    let mut parts = vec![
        bundle.booking.id.to_string(),
        itinerary::route_label(&segments),
        itinerary::segment_summary(&segments),
    ];
    for traveler in &bundle.travelers {
        parts.push(traveler.name.clone());
        parts.push(traveler.pnr.clone());
        if let Some(reason) = &traveler.reason {
            parts.push(reason.clone());
        }
    }
    parts.join(" ").to_lowercase()
}
