//! Aggregation Handler
//!
//! Monthly rollup of confirmed orders for the admin dashboard.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use tracing::error;

use leadform_models::AggregationReport;
use leadform_utils::{resolve_period, LeadformError};

use crate::handlers::{error_response, store_unavailable, ApiError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AggregationQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/submissions/aggregation
///
/// Without explicit bounds the window is the current calendar month.
pub async fn get_aggregation(
    State(state): State<AppState>,
    Query(query): Query<AggregationQuery>,
) -> Result<Json<AggregationReport>, ApiError> {
    let Some(services) = &state.services else {
        return Err(store_unavailable());
    };

    let period = resolve_period(query.start.as_deref(), query.end.as_deref())
        .map_err(error_response)?;

    let report = services.reports.build(&period).await.map_err(|err| {
        error!(error = %err, "Failed to build aggregation report");
        error_response(LeadformError::database("Failed to build aggregation report"))
    })?;

    Ok(Json(report))
}
