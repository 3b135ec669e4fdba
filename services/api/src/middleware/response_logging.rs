use axum::{http::Request, middleware::Next, response::Response};
use tracing::warn;

/// Log non-success responses with their method and path. Success traffic is
/// already covered by the HTTP trace layer.
pub async fn response_logging_middleware(
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() || status.is_client_error() {
        warn!(%method, %path, status = %status, "Request failed");
    }

    response
}
