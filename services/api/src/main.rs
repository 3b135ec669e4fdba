//! Leadform API Service
//!
//! HTTP backend for the DB 신청 form and its admin dashboard: persists
//! submissions and their order items, notifies admin and applicant by
//! email, and serves the monthly aggregation report.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    serve, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use leadform_database::{initialize_database, PostgresPool};
use leadform_utils::{init_logging, AppConfig};

mod handlers;
mod middleware;
mod routes;
mod service;
mod smtp_client;
mod template_engine;

use middleware::*;
use service::{AggregationService, SubmissionService};
use smtp_client::SmtpClient;
use template_engine::TemplateEngine;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    // Initialize logging
    init_logging(&config.logging)?;
    info!("Starting Leadform API Service");

    // Initialize database. A failure here is not fatal: the service still
    // comes up and every store-backed endpoint answers 500 until the
    // credentials are fixed, matching how the dashboard expects outages to
    // surface.
    let db_config = leadform_database::DatabaseConfig {
        postgres_url: config.database.postgres_url.clone(),
        max_connections: config.database.max_connections,
        connection_timeout: std::time::Duration::from_secs(
            config.database.connection_timeout_seconds,
        ),
    };
    let pool = match initialize_database(&db_config).await {
        Ok(pool) => {
            info!("Database connection established");
            Some(pool)
        }
        Err(error) => {
            warn!(error = %error, "Database not configured, store-backed endpoints will fail");
            None
        }
    };

    // Build application state and router
    let state = AppState::new(pool, &config);
    let app = create_app(state, &config)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(&addr).await?;
    info!("Leadform API listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn create_app(state: AppState, config: &AppConfig) -> Result<Router> {
    let allowed_origins: Vec<HeaderValue> = config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors_origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins)
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health_check))
        .route("/health/detailed", get(handlers::detailed_health_check))
        .route("/metrics", get(metrics_handler))
        // API routes
        .nest("/api", routes::create_api_routes())
        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(cors_origin)
                        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(axum::middleware::from_fn(response_logging_middleware)),
        )
        // Application state
        .with_state(state);

    Ok(app)
}

/// Store-backed collaborators, present only when the database came up.
#[derive(Clone)]
pub struct Services {
    pub submissions: SubmissionService,
    pub reports: AggregationService,
}

#[derive(Clone)]
pub struct AppState {
    pub pool: Option<PostgresPool>,
    pub services: Option<Services>,
    pub config: AppConfig,
}

impl AppState {
    fn new(pool: Option<PostgresPool>, config: &AppConfig) -> Self {
        let smtp = match SmtpClient::new(&config.email) {
            Ok(client) => Some(Arc::new(client)),
            Err(error) => {
                warn!(error = %error, "SMTP transport not configured, notifications will be skipped");
                None
            }
        };
        let templates = Arc::new(TemplateEngine::new());

        let services = pool.clone().map(|pool| Services {
            submissions: SubmissionService::new(
                pool.clone(),
                smtp,
                templates,
                config.email.clone(),
            ),
            reports: AggregationService::new(pool),
        });

        Self {
            pool,
            services,
            config: config.clone(),
        }
    }
}

async fn metrics_handler() -> String {
    use prometheus::TextEncoder;

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_else(|_| "Error encoding metrics".to_string())
}
