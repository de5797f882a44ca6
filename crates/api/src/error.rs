use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use userdesk_core::error::CoreError;
use userdesk_db::RepoError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`RepoError`] for persistence
/// failures, and adds HTTP-specific variants. The `Display` text becomes the
/// envelope's `debug_param`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `userdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository error (missing row or driver failure).
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// Malformed path, query, or body.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status for this error.
    ///
    /// Only the four statuses the envelope knows about are ever produced:
    /// input problems are 400, auth problems 401, and everything else,
    /// including missing rows, is reported as 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Core(CoreError::Validation(_)) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Core(CoreError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            AppError::Core(CoreError::Internal(_))
            | AppError::Repo(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
