use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Logs method, URI, status and duration of every request, after the handler
/// chain completes.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %uri,
        status = response.status().as_u16(),
        duration = ?start.elapsed(),
        "request completed"
    );

    response
}
