//! Request middleware and extractors.
//!
//! - [`trace::TraceId`] -- the caller's `Trace-ID` header, echoed in every envelope.
//! - [`logging::log_requests`] -- one structured event per request/response pair.

pub mod logging;
pub mod trace;
