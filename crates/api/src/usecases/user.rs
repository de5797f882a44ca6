//! User use-cases.
//!
//! Thin layer over [`UserRepository`]: validation on create and update,
//! read-modify-write updates, and page clamping for paginated listing.

use async_trait::async_trait;
use userdesk_core::types::DbId;
use userdesk_core::user::{validate_email, validate_new_user};
use userdesk_db::models::user::{CreateUser, UpdateUser, User};
use userdesk_db::repositories::UserRepository;
use userdesk_db::RepoError;

use crate::error::{AppError, AppResult};

/// Page size used when the caller asks for a page without a limit.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// One page of users together with the values needed for pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<User>,
    /// Page number after clamping (1-based).
    pub page: i64,
    /// Page size after clamping.
    pub limit: i64,
    pub total: i64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserUsecase: Send + Sync {
    async fn fetch(&self) -> AppResult<Vec<User>>;

    /// `page` is clamped to at least 1 and `limit` to `1..=MAX_PAGE_LIMIT`.
    async fn fetch_page(&self, page: i64, limit: i64) -> AppResult<UserPage>;

    async fn get_by_id(&self, id: DbId) -> AppResult<User>;

    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Overwrite `email`, `firstname` and `lastname` of an existing user.
    async fn update(&self, id: DbId, input: UpdateUser) -> AppResult<User>;

    async fn delete(&self, id: DbId) -> AppResult<()>;
}

/// [`UserUsecase`] backed by any [`UserRepository`].
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

/// Log a repository failure against the operation that hit it.
fn repo_failure(operation: &'static str) -> impl FnOnce(RepoError) -> AppError {
    move |err| {
        tracing::error!(operation, error = %err, "User repository call failed");
        err.into()
    }
}

#[async_trait]
impl<R: UserRepository> UserUsecase for UserService<R> {
    async fn fetch(&self) -> AppResult<Vec<User>> {
        self.repo.fetch().await.map_err(repo_failure("fetch"))
    }

    async fn fetch_page(&self, page: i64, limit: i64) -> AppResult<UserPage> {
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_LIMIT);
        let offset = (page - 1).saturating_mul(limit);

        let users = self
            .repo
            .fetch_page(limit, offset)
            .await
            .map_err(repo_failure("fetch_page"))?;
        let total = self.repo.count().await.map_err(repo_failure("count"))?;
        Ok(UserPage {
            users,
            page,
            limit,
            total,
        })
    }

    async fn get_by_id(&self, id: DbId) -> AppResult<User> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(repo_failure("get_by_id"))
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        validate_new_user(&input.email, &input.username)?;
        self.repo
            .create(&input)
            .await
            .map_err(repo_failure("create"))
    }

    async fn update(&self, id: DbId, input: UpdateUser) -> AppResult<User> {
        validate_email(&input.email)?;

        let mut user = self
            .repo
            .get_by_id(id)
            .await
            .map_err(repo_failure("get_by_id"))?;
        user.apply_update(input);

        let saved = self
            .repo
            .update(&user)
            .await
            .map_err(repo_failure("update"))?;
        tracing::debug!(id, "User updated");
        Ok(saved)
    }

    async fn delete(&self, id: DbId) -> AppResult<()> {
        self.repo
            .delete(id)
            .await
            .map_err(repo_failure("delete"))?;
        tracing::debug!(id, "User deleted");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
