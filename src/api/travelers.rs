// API module - Traveler endpoints

use axum::{
    extract::{Path, State},
    routing::put,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::{TravelerStatus, TravelerUpdate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct UpdateTravelerRequest {
    #[serde(default)]
    pnr: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    refund_method: Option<String>,
    #[serde(default)]
    refund_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SetStatusRequest {
    status: TravelerStatus,
    #[serde(default)]
    refund_method: Option<String>,
}

/// Trimmed optional text, with blank collapsing to absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn update_traveler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTravelerRequest>,
) -> Result<Json<serde_json::Value>> {
    let pnr = request.pnr.trim();
    if pnr.is_empty() {
        return Err(AppError::Validation("PNR is required".to_string()));
    }

    let update = TravelerUpdate {
        pnr: pnr.to_string(),
        category: clean(request.category),
        reason: clean(request.reason),
        refund_method: clean(request.refund_method),
        refund_notes: clean(request.refund_notes),
    };
    state.store.update_traveler(id, &update).await?;

    tracing::info!(traveler_id = %id, "Traveler updated");

    Ok(Json(json!({})))
}

async fn set_traveler_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<serde_json::Value>> {
    let refund_method = clean(request.refund_method);
    state
        .store
        .set_traveler_status(id, request.status, refund_method)
        .await?;

    tracing::info!(traveler_id = %id, status = request.status.as_str(), "Traveler status changed");

    Ok(Json(json!({})))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/travelers/:id", put(update_traveler))
        .route("/api/travelers/:id/status", put(set_traveler_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{BookingDraft, BookingType, PaymentType, SegmentDraft, TravelerDraft};
    use crate::store::RecordStore;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(RecordStore::new()),
            config: Config {
                host: "127.0.0.1".to_string(),
                port: 0,
                aeroapi_base_url: "http://localhost".to_string(),
                aeroapi_key: None,
                lookup_timeout_secs: 1,
            },
        }
    }

    async fn seed_traveler(state: &AppState) -> (i64, i64) {
        let person = state.store.create_person("Riley Chen").await.unwrap();
        let booking_id = state
            .store
            .create_booking(
                &BookingDraft {
                    booking_type: BookingType::OneWay,
                    payment_type: PaymentType::Cash,
                    cost_cash: Some(99.0),
                    cost_miles: None,
                    fees: None,
                    currency: None,
                    fare_class: None,
                    secondary_class: None,
                    ticket_end: None,
                    issued_on: None,
                },
                &[SegmentDraft {
                    flight_number: "UA90".to_string(),
                    flight_date: "2024-07-01".to_string(),
                    origin: None,
                    destination: None,
                    sched_departure: None,
                    sched_arrival: None,
                    airline: None,
                    aircraft_type: None,
                    segment_group: None,
                }],
                &[TravelerDraft {
                    person_id: person.id,
                    pnr: "AA11BB".to_string(),
                    category: None,
                    reason: None,
                }],
            )
            .await
            .unwrap();
        let bundle = state.store.get_bundle(booking_id).await.unwrap();
        (booking_id, bundle.travelers[0].id)
    }

    #[tokio::test]
    async fn update_normalizes_blank_fields_to_absent() {
        let state = test_state();
        let (booking_id, traveler_id) = seed_traveler(&state).await;

        update_traveler(
            State(state.clone()),
            Path(traveler_id),
            Json(UpdateTravelerRequest {
                pnr: " CC22DD ".to_string(),
                category: Some("  ".to_string()),
                reason: Some(" Conference ".to_string()),
                refund_method: None,
                refund_notes: None,
            }),
        )
        .await
        .unwrap();

        let bundle = state.store.get_bundle(booking_id).await.unwrap();
        let traveler = &bundle.travelers[0];
        assert_eq!(traveler.pnr, "CC22DD");
        assert_eq!(traveler.category, None);
        assert_eq!(traveler.reason.as_deref(), Some("Conference"));
    }

    #[tokio::test]
    async fn blank_pnr_is_rejected() {
        let state = test_state();
        let (_, traveler_id) = seed_traveler(&state).await;

        let err = update_traveler(
            State(state),
            Path(traveler_id),
            Json(UpdateTravelerRequest {
                pnr: "   ".to_string(),
                category: None,
                reason: None,
                refund_method: None,
                refund_notes: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn cancel_records_refund_method_and_reactivation_keeps_it() {
        let state = test_state();
        let (booking_id, traveler_id) = seed_traveler(&state).await;

        set_traveler_status(
            State(state.clone()),
            Path(traveler_id),
            Json(SetStatusRequest {
                status: TravelerStatus::Canceled,
                refund_method: Some(" Voucher ".to_string()),
            }),
        )
        .await
        .unwrap();

        let bundle = state.store.get_bundle(booking_id).await.unwrap();
        assert_eq!(bundle.travelers[0].status, TravelerStatus::Canceled);
        assert_eq!(bundle.travelers[0].refund_method.as_deref(), Some("Voucher"));

        set_traveler_status(
            State(state.clone()),
            Path(traveler_id),
            Json(SetStatusRequest {
                status: TravelerStatus::Active,
                refund_method: None,
            }),
        )
        .await
        .unwrap();

        let bundle = state.store.get_bundle(booking_id).await.unwrap();
        assert_eq!(bundle.travelers[0].status, TravelerStatus::Active);
        assert_eq!(bundle.travelers[0].refund_method.as_deref(), Some("Voucher"));
    }

    #[tokio::test]
    async fn unknown_traveler_is_not_found() {
        let state = test_state();

        let err = set_traveler_status(
            State(state),
            Path(404),
            Json(SetStatusRequest {
                status: TravelerStatus::Canceled,
                refund_method: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }
}
