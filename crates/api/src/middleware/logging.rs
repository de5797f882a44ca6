//! Request/response logging.
//!
//! Buffers both bodies so the full exchange can be emitted as a single
//! structured `"Result"` event, correlated by the caller's trace id and
//! tagged with the service identity from [`ServiceInfo`].
//!
//! [`ServiceInfo`]: crate::config::ServiceInfo

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::Instrument;
use userdesk_core::error::CoreError;

use crate::error::AppError;
use crate::middleware::trace::TraceId;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Largest request body buffered for logging; larger bodies are rejected.
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Axum middleware: attach the [`TraceId`] to the request and log the
/// request/response pair once the handler has answered.
///
/// Mount with `axum::middleware::from_fn_with_state(state, log_requests)`.
pub async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let trace_id = TraceId::from_headers(request.headers());
    let host_url = request.uri().to_string();
    let host_method = request.method().to_string();
    let host_header = format!("{:?}", request.headers());

    let (mut parts, body) = request.into_parts();
    let request_body = match to_bytes(body, MAX_REQUEST_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            let response = ApiResponse::<()>::failure(
                trace_id.0.clone(),
                AppError::BadRequest(format!("failed to read request body: {err}")),
            )
            .into_response();
            return log_exchange(
                &state,
                &trace_id,
                &host_url,
                &host_method,
                &host_header,
                &Bytes::new(),
                response,
            )
            .await;
        }
    };

    parts.extensions.insert(trace_id.clone());
    let request = Request::from_parts(parts, Body::from(request_body.clone()));

    let span = tracing::info_span!("request", trace_id = %trace_id);
    let response = next.run(request).instrument(span).await;

    log_exchange(
        &state,
        &trace_id,
        &host_url,
        &host_method,
        &host_header,
        &request_body,
        response,
    )
    .await
}

/// Buffer the response body, emit the event, and rebuild the response.
async fn log_exchange(
    state: &AppState,
    trace_id: &TraceId,
    host_url: &str,
    host_method: &str,
    host_header: &str,
    request_body: &Bytes,
    response: Response,
) -> Response {
    let (parts, body) = response.into_parts();

    let (response_body, response) = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => (bytes.clone(), Response::from_parts(parts, Body::from(bytes))),
        Err(err) => {
            tracing::error!(trace_id = %trace_id, error = %err, "Failed to buffer response body");
            let fallback = ApiResponse::<()>::failure(
                trace_id.0.clone(),
                AppError::Core(CoreError::Internal(err.to_string())),
            )
            .into_response();
            (Bytes::new(), fallback)
        }
    };

    let status = response.status();
    let service = &state.config.service;
    tracing::info!(
        trace_id = %trace_id,
        host_url,
        host_method,
        host_header,
        host_request = %String::from_utf8_lossy(request_body),
        host_response = %String::from_utf8_lossy(&response_body),
        status_code = status.as_u16(),
        service_name = %service.service_name,
        service_type = %service.service_type,
        service_code = %service.service_code,
        version_release = %service.version_release,
        version_type = %service.version_type,
        "Result"
    );

    response
}
