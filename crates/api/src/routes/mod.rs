pub mod health;
pub mod user;
pub mod version;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// ```text
/// /user                 list, create
/// /user/{user_id}       get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(user::router())
}
