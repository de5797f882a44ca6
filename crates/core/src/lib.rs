//! Shared primitives for the user service: identifier types, the domain
//! error enum, and field validation. Nothing in here performs I/O.

pub mod error;
pub mod types;
pub mod user;
