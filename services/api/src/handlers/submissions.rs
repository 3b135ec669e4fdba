//! Submission Handlers
//!
//! Form intake plus the admin dashboard's list, status, and delete
//! endpoints.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use leadform_database::SubmissionFilter;
use leadform_models::{NewOrderItem, NewSubmission, Submission, SubmissionStatus};
use leadform_utils::{parse_total_amount, validate_model, LeadformError};

use crate::handlers::{error_response, store_unavailable, ApiError};
use crate::AppState;

// ===== Form intake =====

/// Body of `POST /api/send-email`, as submitted by the form wizard.
#[derive(Debug, Deserialize)]
pub struct SubmissionRequest {
    pub name: String,
    pub affiliation: String,
    #[serde(default)]
    pub position: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub items_summary: String,
    /// Comma-formatted display total, e.g. `"420,000"`.
    pub total: String,
    /// Structured line items; absent on requests from older form builds.
    #[serde(default)]
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub message: String,
    pub submission_id: Uuid,
}

/// POST /api/send-email
///
/// Persists the submission and its line items, then dispatches both
/// notification emails. Delivery failures do not fail the request — the
/// submission is already saved by then.
pub async fn create_submission(
    State(state): State<AppState>,
    Json(request): Json<SubmissionRequest>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let Some(services) = &state.services else {
        return Err(store_unavailable());
    };

    let total_amount = parse_total_amount(&request.total).map_err(error_response)?;

    let new_submission = NewSubmission {
        name: request.name,
        affiliation: request.affiliation,
        position: request.position,
        phone: request.phone,
        email: request.email,
        items_summary: request.items_summary,
        total_amount,
    };
    validate_model(&new_submission).map_err(error_response)?;
    for item in &request.items {
        validate_model(item).map_err(error_response)?;
    }

    let submission = services
        .submissions
        .create(&new_submission, &request.items)
        .await
        .map_err(|err| {
            error!(error = %err, "Failed to save submission");
            error_response(LeadformError::database("Failed to save submission"))
        })?;

    services.submissions.notify_created(&submission).await;

    Ok(Json(SubmissionResponse {
        message: "Submission saved".to_string(),
        submission_id: submission.id,
    }))
}

// ===== Admin list =====

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub submissions: Vec<Submission>,
    pub total: usize,
}

/// GET /api/submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<SubmissionListResponse>, ApiError> {
    let Some(services) = &state.services else {
        return Err(store_unavailable());
    };

    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(SubmissionStatus::parse(raw).ok_or_else(|| {
            error_response(LeadformError::validation("status", "Invalid status value"))
        })?),
        None => None,
    };

    let filter = SubmissionFilter {
        status,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    let submissions = services.submissions.list(&filter).await.map_err(|err| {
        error!(error = %err, "Failed to list submissions");
        error_response(LeadformError::database("Failed to list submissions"))
    })?;

    Ok(Json(SubmissionListResponse {
        total: submissions.len(),
        submissions,
    }))
}

// ===== Status update =====

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub submission: Submission,
}

/// PATCH /api/submissions/:id/status
pub async fn update_submission_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
    let Some(services) = &state.services else {
        return Err(store_unavailable());
    };

    let status = SubmissionStatus::parse(&request.status).ok_or_else(|| {
        error_response(LeadformError::validation("status", "Invalid status value"))
    })?;

    let submission = services
        .submissions
        .update_status(id, status)
        .await
        .map_err(|err| {
            error!(error = %err, submission_id = %id, "Failed to update submission status");
            error_response(LeadformError::database("Failed to update submission status"))
        })?
        .ok_or_else(|| error_response(LeadformError::not_found("Submission")))?;

    info!(submission_id = %id, status = %status, "Submission status updated");

    Ok(Json(UpdateStatusResponse {
        message: "Status updated successfully".to_string(),
        submission,
    }))
}

// ===== Deletion =====

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// DELETE /api/submissions/:id
pub async fn delete_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Some(services) = &state.services else {
        return Err(store_unavailable());
    };

    let deleted = services.submissions.delete(id).await.map_err(|err| {
        error!(error = %err, submission_id = %id, "Failed to delete submission");
        error_response(LeadformError::database("Failed to delete submission"))
    })?;

    if !deleted {
        return Err(error_response(LeadformError::not_found("Submission")));
    }

    info!(submission_id = %id, "Submission deleted");

    Ok(Json(DeleteResponse {
        message: "Submission deleted successfully".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub message: String,
    pub deleted: u64,
}

/// POST /api/submissions/bulk-delete
pub async fn bulk_delete_submissions(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    let Some(services) = &state.services else {
        return Err(store_unavailable());
    };

    if request.ids.is_empty() {
        return Err(error_response(LeadformError::validation(
            "ids",
            "Submission IDs are required",
        )));
    }

    let deleted = services
        .submissions
        .delete_many(&request.ids)
        .await
        .map_err(|err| {
            error!(error = %err, "Failed to delete submissions in bulk");
            error_response(LeadformError::database("Failed to delete submissions"))
        })?;

    info!(requested = request.ids.len(), deleted, "Bulk delete completed");

    Ok(Json(BulkDeleteResponse {
        message: "Submissions deleted successfully".to_string(),
        deleted,
    }))
}
