//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use userdesk_core::types::DbId;

/// Full row from the `users` table. Safe to serialize as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
}

/// DTO for creating a new user. Name fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

/// DTO for updating a user.
///
/// The update overwrites all three fields; omitted names become empty.
/// The username is fixed at creation and cannot be changed here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUser {
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

impl User {
    /// Overwrite the mutable fields with the values from `input`.
    pub fn apply_update(&mut self, input: UpdateUser) {
        self.email = input.email;
        self.firstname = input.firstname;
        self.lastname = input.lastname;
    }
}
