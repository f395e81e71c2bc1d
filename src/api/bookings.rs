// API module - Booking endpoints

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::{
    Booking, BookingDraft, Segment, SegmentDraft, TravelerDetail, TravelerDraft, TravelerStatus,
};
use crate::services::itinerary;
use crate::services::overview::{self, OverviewFilter, OverviewRow};
use crate::state::AppState;

/// List/calendar query parameters. Everything arrives as text because
/// the client sends empty strings for unset filters; parsing is lenient
/// and an unparseable value simply means "no filter".
#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    person_id: Option<String>,
    #[serde(default)]
    show_flown: Option<String>,
}

impl ListQuery {
    fn filter(&self) -> OverviewFilter {
        OverviewFilter {
            q: self
                .q
                .clone()
                .filter(|q| !q.trim().is_empty()),
            status: self.status.as_deref().and_then(TravelerStatus::from_param),
            person_id: self
                .person_id
                .as_deref()
                .and_then(|p| p.trim().parse().ok()),
            show_flown: matches!(
                self.show_flown.as_deref().map(str::trim),
                Some("1") | Some("true")
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct BookingListResponse {
    bookings: Vec<OverviewRow>,
}

#[derive(Debug, Serialize)]
struct CalendarDay {
    date: NaiveDate,
    rows: Vec<OverviewRow>,
}

#[derive(Debug, Serialize)]
struct CalendarResponse {
    days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    booking: BookingDraft,
    #[serde(default)]
    segments: Vec<SegmentDraft>,
    #[serde(default)]
    travelers: Vec<TravelerDraft>,
}

#[derive(Debug, Deserialize)]
struct UpdateBookingRequest {
    booking: BookingDraft,
    #[serde(default)]
    segments: Vec<SegmentDraft>,
}

#[derive(Debug, Serialize)]
struct CreateBookingResponse {
    id: i64,
}

/// One directional group with its own layover labels, as rendered on
/// the booking detail page.
#[derive(Debug, Serialize)]
struct GroupView {
    label: String,
    segments: Vec<Segment>,
    layovers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BookingDetailResponse {
    booking: Booking,
    segments: Vec<Segment>,
    groups: Vec<GroupView>,
    layovers: Vec<String>,
    travelers: Vec<TravelerDetail>,
}

fn validate_payment(draft: &BookingDraft) -> Result<()> {
    if let Some(message) = draft.payment_rule_violation() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

fn validate_segments(segments: &[SegmentDraft]) -> Result<()> {
    if segments.is_empty() {
        return Err(AppError::Validation(
            "At least one segment is required".to_string(),
        ));
    }
    for segment in segments {
        if segment.flight_number.trim().is_empty() || segment.flight_date.trim().is_empty() {
            return Err(AppError::Validation(
                "flight_number and flight_date are required for each segment".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_travelers(travelers: &[TravelerDraft]) -> Result<()> {
    if travelers.is_empty() {
        return Err(AppError::Validation(
            "At least one traveler is required".to_string(),
        ));
    }
    if travelers.iter().any(|t| t.pnr.trim().is_empty()) {
        return Err(AppError::Validation(
            "PNR required for each traveler".to_string(),
        ));
    }
    Ok(())
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<BookingListResponse>> {
    let bundles = state.store.list_bundles().await;
    let rows = overview::overview_rows(bundles, &query.filter(), Local::now().date_naive());
    Ok(Json(BookingListResponse { bookings: rows }))
}

async fn booking_calendar(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CalendarResponse>> {
    let bundles = state.store.list_bundles().await;
    let rows = overview::overview_rows(bundles, &query.filter(), Local::now().date_naive());
    let days = overview::calendar_days(rows)
        .into_iter()
        .map(|(date, rows)| CalendarDay { date, rows })
        .collect();
    Ok(Json(CalendarResponse { days }))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>> {
    validate_payment(&request.booking)?;
    validate_segments(&request.segments)?;
    validate_travelers(&request.travelers)?;

    let id = state
        .store
        .create_booking(&request.booking, &request.segments, &request.travelers)
        .await?;

    tracing::info!(
        booking_id = %id,
        segments = request.segments.len(),
        travelers = request.travelers.len(),
        "Booking created"
    );

    Ok(Json(CreateBookingResponse { id }))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookingDetailResponse>> {
    let bundle = state.store.get_bundle(id).await?;

    let layovers = itinerary::layover_labels(&bundle.segments);
    let groups = itinerary::group_segments(bundle.segments.clone())
        .into_iter()
        .map(|group| {
            let layovers = itinerary::layover_labels(&group.segments);
            GroupView {
                label: group.label,
                segments: group.segments,
                layovers,
            }
        })
        .collect();

    Ok(Json(BookingDetailResponse {
        booking: bundle.booking,
        segments: bundle.segments,
        groups,
        layovers,
        travelers: bundle.travelers,
    }))
}

async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<serde_json::Value>> {
    validate_payment(&request.booking)?;
    validate_segments(&request.segments)?;

    state
        .store
        .update_booking(id, &request.booking, &request.segments)
        .await?;

    tracing::info!(booking_id = %id, segments = request.segments.len(), "Booking updated");

    Ok(Json(json!({})))
}

async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    state.store.delete_booking(id).await?;

    tracing::info!(booking_id = %id, "Booking deleted");

    Ok(Json(json!({})))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/calendar", get(booking_calendar))
        .route(
            "/api/bookings/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
}
