//! Repository trait and its Postgres implementation.

pub mod user_repo;

use async_trait::async_trait;
use userdesk_core::types::DbId;

use crate::error::RepoError;
use crate::models::user::{CreateUser, User};

pub use user_repo::UserRepo;

/// Storage contract for the `users` table.
///
/// Every method maps to a single SQL statement.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ordered by id.
    async fn fetch(&self) -> Result<Vec<User>, RepoError>;

    /// One page of users ordered by id.
    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<User>, RepoError>;

    /// Total number of rows in the table.
    async fn count(&self) -> Result<i64, RepoError>;

    /// Insert a row and return it with its assigned id.
    async fn create(&self, input: &CreateUser) -> Result<User, RepoError>;

    /// Save every column of `user` over the row with the same id.
    async fn update(&self, user: &User) -> Result<User, RepoError>;

    /// Returns [`RepoError::NotFound`] when no row has this id.
    async fn get_by_id(&self, id: DbId) -> Result<User, RepoError>;

    /// Returns [`RepoError::NotFound`] when no row was deleted.
    async fn delete(&self, id: DbId) -> Result<(), RepoError>;
}
