// API module - Spend report endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::TravelerStatus;
use crate::services::report::{build_report, to_csv, Report, ReportFilter};
use crate::services::schedule;
use crate::state::AppState;

/// Report query parameters, all optional and parsed leniently. An
/// unparseable date or person id behaves as if the filter were unset.
#[derive(Debug, Default, Deserialize)]
struct ReportQuery {
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    person_id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl ReportQuery {
    fn filter(&self) -> ReportFilter {
        ReportFilter {
            from: self.from.as_deref().and_then(schedule::parse_flight_date),
            to: self.to.as_deref().and_then(schedule::parse_flight_date),
            person_id: self
                .person_id
                .as_deref()
                .and_then(|p| p.trim().parse().ok()),
            category: self
                .category
                .clone()
                .filter(|c| !c.trim().is_empty()),
            status: self.status.as_deref().and_then(TravelerStatus::from_param),
        }
    }
}

// Reports walk the entire history; the listing cap is for the
// overview screens only.
async fn spend_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Report>> {
    let bundles = state.store.all_bundles().await;
    Ok(Json(build_report(bundles, &query.filter())))
}

async fn spend_report_csv(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response> {
    let bundles = state.store.all_bundles().await;
    let report = build_report(bundles, &query.filter());
    let csv = to_csv(&report.rows);

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"travel-report.csv\"",
        ),
    ];
    Ok((headers, csv).into_response())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/report", get(spend_report))
        .route("/api/report.csv", get(spend_report_csv))
}
