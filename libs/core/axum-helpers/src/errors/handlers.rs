use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;

use super::{ErrorCode, ErrorResponse};

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::NotFound,
        "The requested resource was not found",
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Response used by `CatchPanicLayer` when a handler panics.
///
/// The panic payload is logged; the client only sees the generic 500 envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(
        error_code = ErrorCode::InternalError.code(),
        panic = %detail,
        "Request handler panicked"
    );

    let body = Json(ErrorResponse::new(
        ErrorCode::InternalError,
        ErrorCode::InternalError.default_message(),
    ));

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
