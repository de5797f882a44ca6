use std::sync::Arc;

use crate::config::ServerConfig;
use crate::usecases::user::UserUsecase;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind an `Arc` or is already a
/// handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (used by the health check).
    pub pool: userdesk_db::DbPool,
    /// Server configuration, loaded once at startup.
    pub config: Arc<ServerConfig>,
    /// User use-case layer.
    pub users: Arc<dyn UserUsecase>,
}
