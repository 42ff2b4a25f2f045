//! Middleware feeding the in-memory error log.
//!
//! Watches every response and records 4xx/5xx outcomes into the shared
//! [`ErrorLog`](shiftsurvey_core::errorlog::ErrorLog). Handlers that go
//! through [`AppError`](crate::error::AppError) attach an
//! [`ErrorDetail`](crate::error::ErrorDetail) to the response, which
//! supplies the message; responses produced elsewhere (timeouts, panics)
//! fall back to the status line.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ErrorDetail;
use crate::state::AppState;

/// Record error responses into the shared ring buffer.
pub async fn record_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let message = response
            .extensions()
            .get::<ErrorDetail>()
            .map(|d| d.message.clone())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());

        state
            .error_log
            .record(&method, &path, status.as_u16(), &message);
    }

    response
}
