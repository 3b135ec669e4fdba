pub mod aggregation;
pub mod health;
pub mod submissions;

pub use aggregation::*;
pub use health::*;
pub use submissions::*;

use axum::{http::StatusCode, response::Json};

use leadform_utils::{ErrorResponse, LeadformError};

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_response(error: LeadformError) -> ApiError {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(error)))
}

/// 500 for store-backed endpoints while the database is unavailable.
pub(crate) fn store_unavailable() -> ApiError {
    error_response(LeadformError::configuration("Database is not configured"))
}
