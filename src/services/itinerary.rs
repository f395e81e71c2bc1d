//! Segment grouping, ordering, and derived itinerary labels.

use crate::models::{Segment, DEFAULT_SEGMENT_GROUP};
use crate::services::schedule;

/// Placeholder shown wherever a value is missing or unknowable.
pub const PLACEHOLDER: &str = "—";

/// One directional leg of a booking: a label plus its segments in
/// chronological order.
#[derive(Debug, Clone)]
pub struct SegmentGroup {
    pub label: String,
    pub segments: Vec<Segment>,
}

/// Splits a booking's segments into directional groups, preserving the
/// order labels first appear in. Each group is sorted by resolved
/// departure. A booking with no segments still yields one empty
/// "Outbound" group so every consumer sees the same shape.
pub fn group_segments(segments: Vec<Segment>) -> Vec<SegmentGroup> {
    let mut groups: Vec<SegmentGroup> = Vec::new();
    for segment in segments {
        let label = segment.group_label().to_string();
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.segments.push(segment),
            None => groups.push(SegmentGroup {
                label,
                segments: vec![segment],
            }),
        }
    }
    if groups.is_empty() {
        groups.push(SegmentGroup {
            label: DEFAULT_SEGMENT_GROUP.to_string(),
            segments: Vec::new(),
        });
    }
    for group in &mut groups {
        group.segments.sort_by_key(schedule::segment_sort_key);
    }
    groups
}

/// Sorts segments chronologically without grouping them.
pub fn sort_chronologically(segments: &mut [Segment]) {
    segments.sort_by_key(schedule::segment_sort_key);
}

/// Layover labels between adjacent segments, one per gap. A gap whose
/// endpoints cannot both be resolved, or that runs backwards, shows the
/// placeholder rather than a number.
pub fn layover_labels(segments: &[Segment]) -> Vec<String> {
    segments
        .windows(2)
        .map(|pair| match (
            schedule::arrival_instant(&pair[0]),
            schedule::departure_instant(&pair[1]),
        ) {
            (Some(arrive), Some(depart)) => {
                let hours = (depart - arrive).num_seconds() as f64 / 3600.0;
                if hours < 0.0 {
                    PLACEHOLDER.to_string()
                } else if hours < 24.0 {
                    format!("{:.1}h", hours)
                } else {
                    format!("{}h", hours.round() as i64)
                }
            }
            _ => PLACEHOLDER.to_string(),
        })
        .collect()
}

/// "ORIGIN → DESTINATION" across the whole ordered set, with
/// placeholders for missing airports and for an empty set.
pub fn route_label(segments: &[Segment]) -> String {
    match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => format!(
            "{} → {}",
            first.origin.as_deref().unwrap_or(PLACEHOLDER),
            last.destination.as_deref().unwrap_or(PLACEHOLDER),
        ),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Compact one-line summary: "VS45 LHR→BOM • VS46 BOM→LHR".
pub fn segment_summary(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            format!(
                "{} {}→{}",
                s.flight_number,
                s.origin.as_deref().unwrap_or(""),
                s.destination.as_deref().unwrap_or(""),
            )
            .trim()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join(" • ")
}
