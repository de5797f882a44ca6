//! Route definitions for the user resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted under `/v1`.
///
/// ```text
/// GET    /user              -> fetch
/// POST   /user              -> create
/// GET    /user/{user_id}    -> get_by_id
/// PUT    /user/{user_id}    -> update
/// DELETE /user/{user_id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", get(user::fetch).post(user::create))
        .route(
            "/user/{user_id}",
            get(user::get_by_id)
                .put(user::update)
                .delete(user::delete),
        )
}
