//! Schedule time normalization.
//!
//! Segment times arrive in whatever shape manual entry or the flight
//! lookup produced: a full timestamp, a bare time-of-day anchored by the
//! segment's flight date, or nothing at all. Everything downstream
//! (ordering, layovers, date filters) works off a single resolved
//! instant, with `None` standing in for "unknown". Unparseable input
//! degrades, it never errors.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::Segment;

/// Timestamp forms accepted for a fully-specified schedule field.
/// Offset-less forms are taken as written; offset-carrying forms are
/// normalized to UTC wall time first.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const CLOCK_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Parses a full date-time string, or `None` if it is not one.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Parses a bare time-of-day such as "9:05" or "14:30:00".
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

/// Parses a calendar date, tolerating a timestamp where a date was
/// expected by falling back to its date part.
pub fn parse_flight_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|dt| dt.date()))
}

/// Resolves one schedule field against the segment's flight date.
///
/// Resolution order: a full timestamp wins outright; a bare time-of-day
/// is combined with the flight date; a parseable flight date alone means
/// midnight of that date; anything else is unknown.
fn resolve(raw: Option<&str>, flight_date: &str) -> Option<NaiveDateTime> {
    if let Some(raw) = raw {
        if let Some(instant) = parse_timestamp(raw) {
            return Some(instant);
        }
        if let Some(clock) = parse_clock(raw) {
            if let Some(date) = parse_flight_date(flight_date) {
                return Some(date.and_time(clock));
            }
        }
    }
    parse_flight_date(flight_date).map(|date| date.and_time(NaiveTime::MIN))
}

/// The segment's resolved departure instant, if any.
pub fn departure_instant(segment: &Segment) -> Option<NaiveDateTime> {
    resolve(segment.sched_departure.as_deref(), &segment.flight_date)
}

/// The segment's resolved arrival instant, if any.
pub fn arrival_instant(segment: &Segment) -> Option<NaiveDateTime> {
    resolve(segment.sched_arrival.as_deref(), &segment.flight_date)
}

/// Chronological sort key for a segment. Unknown departures key to the
/// epoch so they sort ahead of everything real, matching the behavior
/// the list views have always had.
pub fn segment_sort_key(segment: &Segment) -> i64 {
    departure_instant(segment)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(flight_date: &str, dep: Option<&str>, arr: Option<&str>) -> Segment {
        Segment {
            id: 1,
            booking_id: 1,
            flight_number: "VS45".to_string(),
            flight_date: flight_date.to_string(),
            origin: None,
            destination: None,
            sched_departure: dep.map(str::to_string),
            sched_arrival: arr.map(str::to_string),
            airline: None,
            aircraft_type: None,
            segment_group: None,
        }
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn full_timestamp_wins_over_flight_date() {
        let seg = segment("2030-12-31", Some("2024-03-01T14:30:00"), None);
        assert_eq!(departure_instant(&seg), Some(dt("2024-03-01T14:30:00")));
    }

    #[test]
    fn rfc3339_offset_is_normalized_to_utc() {
        let seg = segment("2024-03-01", Some("2024-03-01T14:30:00Z"), None);
        assert_eq!(departure_instant(&seg), Some(dt("2024-03-01T14:30:00")));

        let seg = segment("2024-03-01", Some("2024-03-01T14:30:00+02:00"), None);
        assert_eq!(departure_instant(&seg), Some(dt("2024-03-01T12:30:00")));
    }

    #[test]
    fn bare_clock_combines_with_flight_date() {
        let seg = segment("2024-03-01", Some("14:30"), None);
        assert_eq!(departure_instant(&seg), Some(dt("2024-03-01T14:30:00")));
    }

    #[test]
    fn flight_date_alone_means_midnight() {
        let seg = segment("2024-03-01", None, None);
        assert_eq!(departure_instant(&seg), Some(dt("2024-03-01T00:00:00")));

        let seg = segment("2024-03-01", Some("not a time"), None);
        assert_eq!(departure_instant(&seg), Some(dt("2024-03-01T00:00:00")));
    }

    #[test]
    fn nothing_usable_is_unknown() {
        let seg = segment("soon", Some("whenever"), None);
        assert_eq!(departure_instant(&seg), None);
        assert_eq!(segment_sort_key(&seg), 0);
    }

    #[test]
    fn arrival_resolves_from_its_own_field() {
        let seg = segment("2024-03-01", Some("08:00"), Some("11:45"));
        assert_eq!(arrival_instant(&seg), Some(dt("2024-03-01T11:45:00")));
    }

    #[test]
    fn sort_key_orders_segments() {
        let early = segment("2024-03-01", Some("08:00"), None);
        let late = segment("2024-03-01", Some("19:00"), None);
        assert!(segment_sort_key(&early) < segment_sort_key(&late));
    }

    #[test]
    fn flight_date_tolerates_timestamp_text() {
        assert_eq!(
            parse_flight_date("2024-03-01T09:00:00"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_flight_date("2024-03-01"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_flight_date("03/01/2024"), None);
    }
}
