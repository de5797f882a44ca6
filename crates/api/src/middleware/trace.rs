//! Caller-supplied correlation id.

use std::convert::Infallible;
use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

/// Request header carrying the correlation id.
pub const TRACE_ID_HEADER: &str = "Trace-ID";

/// The `Trace-ID` header value, or an empty string when absent.
///
/// The value is never validated or generated; it is echoed verbatim.
///
/// ```ignore
/// async fn my_handler(TraceId(trace_id): TraceId) -> ApiResponse<()> {
///     ApiResponse::ok_empty(trace_id)
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceId(pub String);

impl TraceId {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = headers
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        TraceId(value.to_string())
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for TraceId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The logging middleware stores the id it logged; fall back to the
        // header for routers mounted without it.
        Ok(parts
            .extensions
            .get::<TraceId>()
            .cloned()
            .unwrap_or_else(|| TraceId::from_headers(&parts.headers)))
    }
}
