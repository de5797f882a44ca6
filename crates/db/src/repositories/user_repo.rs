//! Repository for the `users` table.

use async_trait::async_trait;
use sqlx::PgPool;
use userdesk_core::types::DbId;
use userdesk_core::user::USER_ENTITY;

use super::UserRepository;
use crate::error::RepoError;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, username, firstname, lastname";

/// Postgres-backed [`UserRepository`].
#[derive(Clone)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn not_found(id: DbId) -> RepoError {
        RepoError::NotFound {
            entity: USER_ENTITY,
            id,
        }
    }
}

#[async_trait]
impl UserRepository for UserRepo {
    async fn fetch(&self) -> Result<Vec<User>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to list users");
                e.into()
            })
    }

    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<User>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, limit, offset, "Failed to list user page");
                e.into()
            })
    }

    async fn count(&self) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to count users");
                e.into()
            })
    }

    async fn create(&self, input: &CreateUser) -> Result<User, RepoError> {
        let query = format!(
            "INSERT INTO users (email, username, firstname, lastname)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.firstname)
            .bind(&input.lastname)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, username = %input.username, "Failed to create user");
                e.into()
            })
    }

    async fn update(&self, user: &User) -> Result<User, RepoError> {
        let query = format!(
            "UPDATE users SET
                email = $2,
                username = $3,
                firstname = $4,
                lastname = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.firstname)
            .bind(&user.lastname)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id = user.id, "Failed to update user");
                RepoError::from(e)
            })?;
        row.ok_or_else(|| Self::not_found(user.id))
    }

    async fn get_by_id(&self, id: DbId) -> Result<User, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id, "Failed to load user");
                RepoError::from(e)
            })?;
        row.ok_or_else(|| Self::not_found(id))
    }

    async fn delete(&self, id: DbId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id, "Failed to delete user");
                RepoError::from(e)
            })?;
        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
