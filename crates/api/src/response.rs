//! Uniform response envelope for every API answer.
//!
//! Each handler builds a fresh [`ResponseEnvelope`] per request, fills it via
//! [`ResponseEnvelope::set`] (and optionally
//! [`ResponseEnvelope::set_pagination`]), and hands it to the transport
//! wrapped in an [`ApiResponse`] so the envelope and the HTTP status always
//! agree.
//!
//! Wire shape:
//!
//! ```json
//! {
//!   "response_code": "PCFG-200",
//!   "response_message": "Success",
//!   "trace_id": "abc-123",
//!   "total_page": 2,
//!   "total_record": 15,
//!   "record_per_page": 10,
//!   "page_num": 1,
//!   "data": { ... }
//! }
//! ```
//!
//! `debug_param` appears only after an error was passed to `set`; pagination
//! fields appear only when non-zero; `data` only when present.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Serialize, Serializer};

use crate::error::{AppError, AppResult};

pub const CODE_SUCCESS: &str = "PCFG-200";
pub const CODE_BAD_REQUEST: &str = "PCFG-400";
pub const CODE_INTERNAL_SERVER: &str = "PCFG-500";
/// Unprefixed on the wire; existing clients match on the bare literal.
pub const CODE_UNAUTHORIZED: &str = "401";
/// Reserved. No status maps to it.
pub const CODE_UNAUTHORIZED_ACCESS: &str = "PCFG-403";

pub const CODE_SUCCESS_MSG: &str = "Success";
pub const CODE_BAD_REQUEST_MSG: &str = "Bad Request";
pub const CODE_INTERNAL_SERVER_MSG: &str = "Internal Server Error";
pub const CODE_UNAUTHORIZED_MSG: &str = "Unauthorized";
pub const CODE_UNAUTHORIZED_ACCESS_MSG: &str = "Unauthorized Access";

/// Map an HTTP status to its envelope `(code, message)` pair.
///
/// Anything outside 200/400/401/500 reports as an internal server error.
pub const fn map_status_code(status_code: u16) -> (&'static str, &'static str) {
    match status_code {
        200 => (CODE_SUCCESS, CODE_SUCCESS_MSG),
        400 => (CODE_BAD_REQUEST, CODE_BAD_REQUEST_MSG),
        401 => (CODE_UNAUTHORIZED, CODE_UNAUTHORIZED_MSG),
        _ => (CODE_INTERNAL_SERVER, CODE_INTERNAL_SERVER_MSG),
    }
}

/// Error detail attached to failed responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub debug_param: String,
}

/// Pagination metadata, flattened into the envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pagination {
    #[serde(
        skip_serializing_if = "is_zero_f64",
        serialize_with = "serialize_whole_f64"
    )]
    pub total_page: f64,
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub total_record: i64,
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub record_per_page: i64,
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub page_num: i64,
}

fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}

/// Whole values go out as integers (`2`, not `2.0`) so clients decoding
/// into an integer type accept them.
fn serialize_whole_f64<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// The JSON body of every API response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope<T = serde_json::Value> {
    pub response_code: &'static str,
    pub response_message: &'static str,
    #[serde(rename = "debug_param", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    pub trace_id: String,
    #[serde(flatten)]
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Default for ResponseEnvelope<T> {
    fn default() -> Self {
        Self {
            response_code: "",
            response_message: "",
            meta: None,
            trace_id: String::new(),
            pagination: Pagination::default(),
            data: None,
        }
    }
}

impl<T> ResponseEnvelope<T> {
    /// Store the caller-supplied correlation id verbatim.
    pub fn set_trace_id(&mut self, trace_id: impl Into<String>) {
        self.trace_id = trace_id.into();
    }

    /// Record an outcome.
    ///
    /// `data` is assigned even when `err` is present. A `None` error leaves
    /// any earlier `debug_param` in place, so never reuse an envelope across
    /// requests.
    pub fn set(&mut self, status_code: u16, data: Option<T>, err: Option<&dyn fmt::Display>) {
        let (code, message) = map_status_code(status_code);
        self.response_code = code;
        self.response_message = message;
        self.data = data;

        if let Some(err) = err {
            self.meta = Some(Meta {
                debug_param: err.to_string(),
            });
        }
    }

    /// Attach pagination metadata. A zero `limit` yields zero total pages.
    pub fn set_pagination(&mut self, page: i64, limit: i64, total_count: i64) {
        self.pagination.total_page = if limit != 0 {
            (total_count as f64 / limit as f64).ceil()
        } else {
            0.0
        };
        self.pagination.total_record = total_count;
        self.pagination.record_per_page = limit;
        self.pagination.page_num = page;
    }
}

/// An envelope paired with the HTTP status it is sent under.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    envelope: ResponseEnvelope<T>,
}

impl<T> ApiResponse<T> {
    fn with_trace_id(trace_id: String) -> Self {
        let mut envelope = ResponseEnvelope::default();
        envelope.set_trace_id(trace_id);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            envelope,
        }
    }

    /// 200 with `data` as payload.
    pub fn ok(trace_id: String, data: T) -> Self {
        let mut response = Self::with_trace_id(trace_id);
        response.status = StatusCode::OK;
        response.envelope.set(StatusCode::OK.as_u16(), Some(data), None);
        response
    }

    /// 200 without a payload.
    pub fn ok_empty(trace_id: String) -> Self {
        let mut response = Self::with_trace_id(trace_id);
        response.status = StatusCode::OK;
        response.envelope.set(StatusCode::OK.as_u16(), None, None);
        response
    }

    /// Failure response; the status comes from [`AppError::status_code`].
    pub fn failure(trace_id: String, err: AppError) -> Self {
        tracing::error!(trace_id = %trace_id, error = %err, "Request failed");
        let mut response = Self::with_trace_id(trace_id);
        response.status = err.status_code();
        response
            .envelope
            .set(response.status.as_u16(), None, Some(&err));
        response
    }

    pub fn from_result(trace_id: String, result: AppResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(trace_id, data),
            Err(err) => Self::failure(trace_id, err),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn envelope(&self) -> &ResponseEnvelope<T> {
        &self.envelope
    }

    pub fn envelope_mut(&mut self) -> &mut ResponseEnvelope<T> {
        &mut self.envelope
    }
}

impl ApiResponse<()> {
    /// Like [`ApiResponse::from_result`] but never emits a `data` field.
    pub fn from_unit_result(trace_id: String, result: AppResult<()>) -> Self {
        match result {
            Ok(()) => Self::ok_empty(trace_id),
            Err(err) => Self::failure(trace_id, err),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
