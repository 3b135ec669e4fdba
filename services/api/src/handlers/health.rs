use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use leadform_database::health_check as postgres_health_check;

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "leadform-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let postgres_status = match &state.pool {
        Some(pool) => match postgres_health_check(pool).await {
            Ok(_) => json!({"status": "healthy", "message": "Connected"}),
            Err(e) => json!({"status": "unhealthy", "message": e.to_string()}),
        },
        None => json!({"status": "unhealthy", "message": "Not configured"}),
    };

    let healthy = postgres_status["status"] == "healthy";

    Json(json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "leadform-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {
            "postgres": postgres_status
        }
    }))
}
