use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::flight_lookup::FlightLookupError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lookup(#[from] FlightLookupError),

    #[error("Flight lookup is not configured on this server")]
    LookupNotConfigured,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_debug = format!("{:?}", self);

        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Store(err) => match err {
                StoreError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                StoreError::DuplicateName => (StatusCode::BAD_REQUEST, err.to_string()),
            },
            AppError::Lookup(err) => match err {
                FlightLookupError::NoFlights => (StatusCode::NOT_FOUND, err.to_string()),
                FlightLookupError::BadBaseUrl => {
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
                FlightLookupError::Upstream { .. } | FlightLookupError::Http(_) => {
                    (StatusCode::BAD_GATEWAY, err.to_string())
                }
            },
            AppError::LookupNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Flight lookup is not configured on this server".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_debug,
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
