use userdesk_core::types::DbId;

/// Errors returned by repository implementations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// No row matched the requested primary key.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Any failure reported by the driver.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
