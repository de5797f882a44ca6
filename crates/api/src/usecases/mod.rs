//! Business rules sitting between handlers and repositories.

pub mod user;
