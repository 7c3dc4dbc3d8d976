use std::any::Any;
use std::backtrace::Backtrace;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use uuid::Uuid;

/// Panic responder for the recovery layer wrapped around the whole router.
/// The panic is logged with a backtrace under a generated correlation id; the
/// client sees only the id, never internal detail.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    };

    let correlation_id = Uuid::new_v4().to_string();
    let backtrace = Backtrace::force_capture();
    tracing::error!(%correlation_id, panic = %detail, "recovered from panic\n{backtrace}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "title": "Internal Server Error",
            "status": 500,
            "detail": "An unexpected error occurred. Please try again later or \
                       contact support quoting the correlation id.",
            "correlationId": correlation_id,
        })),
    )
        .into_response()
}
