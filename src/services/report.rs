//! Spend report over traveler bookings, with CSV export.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{BookingBundle, PaymentType, TravelerStatus};
use crate::services::{itinerary, schedule};

/// Report filter. `person_id` and `status` are exact matches, `category`
/// is a case-insensitive substring; all three apply before the date
/// range does.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub person_id: Option<i64>,
    pub category: Option<String>,
    pub status: Option<TravelerStatus>,
}

/// One traveler on one booking, flattened for the report table.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub person: String,
    pub route: String,
    pub first_departure: Option<NaiveDateTime>,
    pub booking_id: i64,
    pub reason: Option<String>,
    pub category: Option<String>,
    pub payment_type: PaymentType,
    pub cost_cash: Option<f64>,
    pub cost_miles: Option<i64>,
    pub fees: Option<f64>,
    pub status: TravelerStatus,
}

/// Running sums over the rows that survived filtering. Absent amounts
/// count as zero here even though they display as "N/A" in the rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTotals {
    pub cash_spend: f64,
    pub miles_used: i64,
    pub award_fees: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub totals: ReportTotals,
}

/// Builds the report from loaded bundles. Row order follows the bundle
/// order the caller supplies (newest booking first from the store).
pub fn build_report(bundles: Vec<BookingBundle>, filter: &ReportFilter) -> Report {
    let category = filter
        .category
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    let mut rows = Vec::new();
    let mut totals = ReportTotals::default();

    for bundle in bundles {
        let mut segments = bundle.segments;
        itinerary::sort_chronologically(&mut segments);
        let route = itinerary::route_label(&segments);
        let first_departure = segments.first().and_then(schedule::departure_instant);
        let departure_date = first_departure.map(|dt| dt.date());

        for traveler in bundle.travelers {
            if let Some(person_id) = filter.person_id {
                if traveler.person_id != person_id {
                    continue;
                }
            }
            if let Some(status) = filter.status {
                if traveler.status != status {
                    continue;
                }
            }
            if let Some(needle) = &category {
                let matched = traveler
                    .category
                    .as_deref()
                    .map(|c| c.to_lowercase().contains(needle.as_str()))
                    .unwrap_or(false);
                if !matched {
                    continue;
                }
            }
            // Date bounds only exclude rows whose departure date is
            // known; unknown departures always stay in the report.
            if let (Some(date), Some(from)) = (departure_date, filter.from) {
                if date < from {
                    continue;
                }
            }
            if let (Some(date), Some(to)) = (departure_date, filter.to) {
                if date > to {
                    continue;
                }
            }

            match bundle.booking.payment_type {
                PaymentType::Cash => {
                    totals.cash_spend += bundle.booking.cost_cash.unwrap_or(0.0);
                }
                PaymentType::Miles => {
                    totals.miles_used += bundle.booking.cost_miles.unwrap_or(0);
                    totals.award_fees += bundle.booking.fees.unwrap_or(0.0);
                }
            }

            rows.push(ReportRow {
                person: traveler.name,
                route: route.clone(),
                first_departure,
                booking_id: bundle.booking.id,
                reason: traveler.reason,
                category: traveler.category,
                payment_type: bundle.booking.payment_type,
                cost_cash: bundle.booking.cost_cash,
                cost_miles: bundle.booking.cost_miles,
                fees: bundle.booking.fees,
                status: traveler.status,
            });
        }
    }

    Report { rows, totals }
}

const CSV_HEADER: &str =
    "person,route,first_departure,booking_id,reason,category,payment_type,cost_cash,cost_miles,fees,status";

/// Serializes rows in the fixed export column order. Every data value
/// is quoted, with embedded quotes doubled; header cells are bare.
/// Absent costs render as "N/A", other absent values as empty cells.
pub fn to_csv(rows: &[ReportRow]) -> String {
    let mut lines = vec![CSV_HEADER.to_string()];
    for row in rows {
        let cells = [
            csv_cell(&row.person),
            csv_cell(&row.route),
            csv_cell(
                &row.first_departure
                    .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
                    .unwrap_or_default(),
            ),
            csv_cell(&row.booking_id.to_string()),
            csv_cell(row.reason.as_deref().unwrap_or("")),
            csv_cell(row.category.as_deref().unwrap_or("")),
            csv_cell(row.payment_type.as_str()),
            csv_cell(&money_cell(row.cost_cash)),
            csv_cell(
                &row.cost_miles
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            csv_cell(&money_cell(row.fees)),
            csv_cell(row.status.as_str()),
        ];
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

fn money_cell(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, BookingType, Segment, TravelerDetail};

    fn cash_booking(id: i64, cost: Option<f64>) -> Booking {
        Booking {
            id,
            booking_type: BookingType::Roundtrip,
            payment_type: PaymentType::Cash,
            cost_cash: cost,
            cost_miles: None,
            fees: None,
            currency: "USD".to_string(),
            fare_class: None,
            secondary_class: None,
            ticket_end: None,
            issued_on: None,
        }
    }

    fn miles_booking(id: i64, miles: i64, fees: f64) -> Booking {
        Booking {
            payment_type: PaymentType::Miles,
            cost_cash: None,
            cost_miles: Some(miles),
            fees: Some(fees),
            ..cash_booking(id, None)
        }
    }

    fn segment(booking_id: i64, flight_date: &str) -> Segment {
        Segment {
            id: 0,
            booking_id,
            flight_number: "DL1".to_string(),
            flight_date: flight_date.to_string(),
            origin: Some("JFK".to_string()),
            destination: Some("LAX".to_string()),
            sched_departure: None,
            sched_arrival: None,
            airline: None,
            aircraft_type: None,
            segment_group: None,
        }
    }

    fn traveler(person_id: i64, name: &str, category: Option<&str>) -> TravelerDetail {
        TravelerDetail {
            id: person_id,
            person_id,
            name: name.to_string(),
            pnr: "PNR123".to_string(),
            category: category.map(str::to_string),
            reason: None,
            status: TravelerStatus::Active,
            refund_method: None,
            refund_notes: None,
        }
    }

    fn bundle(booking: Booking, flight_date: &str, travelers: Vec<TravelerDetail>) -> BookingBundle {
        let id = booking.id;
        BookingBundle {
            booking,
            segments: vec![segment(id, flight_date)],
            travelers,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn totals_split_cash_from_award_travel() {
        let bundles = vec![
            bundle(cash_booking(1, Some(100.0)), "2024-06-01", vec![traveler(1, "Ada", None)]),
            bundle(cash_booking(2, Some(50.0)), "2024-06-02", vec![traveler(2, "Ben", None)]),
            bundle(miles_booking(3, 20000, 30.0), "2024-06-03", vec![traveler(3, "Cleo", None)]),
        ];
        let report = build_report(bundles, &ReportFilter::default());
        assert_eq!(report.rows.len(), 3);
        assert_eq!(
            report.totals,
            ReportTotals {
                cash_spend: 150.0,
                miles_used: 20000,
                award_fees: 30.0,
            }
        );
    }

    #[test]
    fn absent_amounts_sum_as_zero_but_stay_absent_in_rows() {
        let bundles = vec![bundle(cash_booking(1, None), "2024-06-01", vec![traveler(1, "Ada", None)])];
        let report = build_report(bundles, &ReportFilter::default());
        assert_eq!(report.totals.cash_spend, 0.0);
        assert_eq!(report.rows[0].cost_cash, None);
    }

    #[test]
    fn totals_cover_only_retained_rows() {
        let bundles = vec![
            bundle(cash_booking(1, Some(100.0)), "2024-06-01", vec![traveler(1, "Ada", None)]),
            bundle(cash_booking(2, Some(999.0)), "2023-01-01", vec![traveler(2, "Ben", None)]),
        ];
        let filter = ReportFilter {
            from: Some(date("2024-01-01")),
            ..Default::default()
        };
        let report = build_report(bundles, &filter);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.totals.cash_spend, 100.0);
    }

    #[test]
    fn category_matches_substring_case_insensitively() {
        let bundles = vec![
            bundle(
                cash_booking(1, Some(10.0)),
                "2024-06-01",
                vec![traveler(1, "Ada", Some("Trade show"))],
            ),
            bundle(
                cash_booking(2, Some(10.0)),
                "2024-06-01",
                vec![traveler(2, "Ben", Some("Client visit"))],
            ),
            bundle(cash_booking(3, Some(10.0)), "2024-06-01", vec![traveler(3, "Cleo", None)]),
        ];
        let filter = ReportFilter {
            category: Some("TRADE".to_string()),
            ..Default::default()
        };
        let report = build_report(bundles, &filter);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].person, "Ada");
    }

    #[test]
    fn unknown_departure_survives_date_bounds() {
        let bundles = vec![bundle(
            cash_booking(1, Some(10.0)),
            "someday",
            vec![traveler(1, "Ada", None)],
        )];
        let filter = ReportFilter {
            from: Some(date("2024-01-01")),
            to: Some(date("2024-12-31")),
            ..Default::default()
        };
        let report = build_report(bundles, &filter);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].first_departure, None);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let bundles = vec![
            bundle(cash_booking(1, Some(10.0)), "2024-06-01", vec![traveler(1, "Ada", None)]),
            bundle(cash_booking(2, Some(10.0)), "2024-06-02", vec![traveler(2, "Ben", None)]),
        ];
        let filter = ReportFilter {
            from: Some(date("2024-06-01")),
            to: Some(date("2024-06-01")),
            ..Default::default()
        };
        let report = build_report(bundles, &filter);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].person, "Ada");
    }

    #[test]
    fn status_and_person_filters_are_exact() {
        let mut canceled = traveler(2, "Ben", None);
        canceled.status = TravelerStatus::Canceled;
        let bundles = vec![bundle(
            cash_booking(1, Some(10.0)),
            "2024-06-01",
            vec![traveler(1, "Ada", None), canceled],
        )];

        let filter = ReportFilter {
            status: Some(TravelerStatus::Canceled),
            ..Default::default()
        };
        let report = build_report(bundles.clone(), &filter);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].person, "Ben");

        let filter = ReportFilter {
            person_id: Some(1),
            ..Default::default()
        };
        let report = build_report(bundles, &filter);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].person, "Ada");
    }

    #[test]
    fn csv_quotes_every_value_and_doubles_embedded_quotes() {
        let mut with_quote = traveler(1, "Ada", Some("Trade show"));
        with_quote.reason = Some("the \"big\" expo".to_string());
        let bundles = vec![bundle(cash_booking(1, Some(100.0)), "2024-06-01", vec![with_quote])];
        let report = build_report(bundles, &ReportFilter::default());
        let csv = to_csv(&report.rows);

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("person,route,first_departure,booking_id,reason,category,payment_type,cost_cash,cost_miles,fees,status"),
        );
        let row = lines.next().unwrap();
        assert_eq!(
            row,
            "\"Ada\",\"JFK → LAX\",\"2024-06-01T00:00:00\",\"1\",\"the \"\"big\"\" expo\",\"Trade show\",\"Cash\",\"100\",\"N/A\",\"N/A\",\"Active\"",
        );
        assert!(lines.next().is_none());
    }
}
