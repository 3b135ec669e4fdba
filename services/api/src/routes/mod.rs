use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/send-email", post(create_submission))
        .route("/submissions", get(list_submissions))
        .route("/submissions/aggregation", get(get_aggregation))
        .route("/submissions/bulk-delete", post(bulk_delete_submissions))
        .route("/submissions/:id/status", patch(update_submission_status))
        .route("/submissions/:id", delete(delete_submission))
}
