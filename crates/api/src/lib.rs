//! User service API library.
//!
//! Exposes configuration, state, the response envelope, error handling, the
//! use-case layer, and the router builder so integration tests and the
//! binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod usecases;

#[cfg(test)]
mod test_support;
