//! Handlers for the `/v1/user` resource.
//!
//! Every handler answers with a [`ResponseEnvelope`] carrying the caller's
//! trace id. Extractor rejections are taken as `Result`s so malformed input
//! still produces an envelope (400) instead of axum's plain-text rejection.
//!
//! [`ResponseEnvelope`]: crate::response::ResponseEnvelope

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use userdesk_core::types::DbId;
use userdesk_db::models::user::{CreateUser, UpdateUser, User};

use crate::middleware::trace::TraceId;
use crate::query::PaginationParams;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::usecases::user::DEFAULT_PAGE_LIMIT;

/// GET /v1/user
///
/// Lists every user, or one page of users when `page` or `limit` is given.
pub async fn fetch(
    State(state): State<AppState>,
    TraceId(trace_id): TraceId,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> ApiResponse<Vec<User>> {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => return ApiResponse::failure(trace_id, rejection.into()),
    };

    if !params.is_requested() {
        return ApiResponse::from_result(trace_id, state.users.fetch().await);
    }

    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    match state.users.fetch_page(page, limit).await {
        Ok(page) => {
            let mut response = ApiResponse::ok(trace_id, page.users);
            response
                .envelope_mut()
                .set_pagination(page.page, page.limit, page.total);
            response
        }
        Err(err) => ApiResponse::failure(trace_id, err),
    }
}

/// GET /v1/user/{user_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    TraceId(trace_id): TraceId,
    path: Result<Path<DbId>, PathRejection>,
) -> ApiResponse<User> {
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return ApiResponse::failure(trace_id, rejection.into()),
    };
    ApiResponse::from_result(trace_id, state.users.get_by_id(id).await)
}

/// POST /v1/user
pub async fn create(
    State(state): State<AppState>,
    TraceId(trace_id): TraceId,
    body: Result<Json<CreateUser>, JsonRejection>,
) -> ApiResponse<User> {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return ApiResponse::failure(trace_id, rejection.into()),
    };
    ApiResponse::from_result(trace_id, state.users.create(input).await)
}

/// PUT /v1/user/{user_id}
pub async fn update(
    State(state): State<AppState>,
    TraceId(trace_id): TraceId,
    path: Result<Path<DbId>, PathRejection>,
    body: Result<Json<UpdateUser>, JsonRejection>,
) -> ApiResponse<User> {
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return ApiResponse::failure(trace_id, rejection.into()),
    };
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return ApiResponse::failure(trace_id, rejection.into()),
    };
    ApiResponse::from_result(trace_id, state.users.update(id, input).await)
}

/// DELETE /v1/user/{user_id}
pub async fn delete(
    State(state): State<AppState>,
    TraceId(trace_id): TraceId,
    path: Result<Path<DbId>, PathRejection>,
) -> ApiResponse<()> {
    let id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return ApiResponse::failure(trace_id, rejection.into()),
    };
    ApiResponse::from_unit_result(trace_id, state.users.delete(id).await)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use mockall::predicate::eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use userdesk_db::RepoError;

    use super::*;
    use crate::config::ServerConfig;
    use crate::error::AppError;
    use crate::routes;
    use crate::usecases::user::{MockUserUsecase, UserPage};

    fn sample(id: DbId) -> User {
        User {
            id,
            email: "test@gmail.com".into(),
            username: "test".into(),
            firstname: "test".into(),
            lastname: "test".into(),
        }
    }

    fn app(users: MockUserUsecase) -> Router {
        let config = ServerConfig::from_lookup(|key| {
            (key == "DATABASE_URL").then(|| "postgres://localhost/unused".to_string())
        })
        .unwrap();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .unwrap();
        let state = AppState {
            pool,
            config: Arc::new(config),
            users: Arc::new(users),
        };
        Router::new()
            .nest("/v1", routes::api_routes())
            .with_state(state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("Trace-ID", "trace-1")
            .body(Body::empty())
            .unwrap()
    }

    fn with_json(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn fetch_without_paging_returns_all_users() {
        let mut users = MockUserUsecase::new();
        users
            .expect_fetch()
            .returning(|| Ok(vec![sample(1), sample(2)]));
        users.expect_fetch_page().never();

        let (status, json) = send(app(users), get("/v1/user")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response_code"], "PCFG-200");
        assert_eq!(json["trace_id"], "trace-1");
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert!(json.get("total_page").is_none());
        assert!(json.get("debug_param").is_none());
    }

    #[tokio::test]
    async fn fetch_with_paging_sets_pagination_fields() {
        let mut users = MockUserUsecase::new();
        users
            .expect_fetch_page()
            .with(eq(1), eq(10))
            .returning(|page, limit| {
                Ok(UserPage {
                    users: vec![sample(1)],
                    page,
                    limit,
                    total: 15,
                })
            });

        let (status, json) = send(app(users), get("/v1/user?page=1&limit=10")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_page"], 2.0);
        assert_eq!(json["total_record"], 15);
        assert_eq!(json["record_per_page"], 10);
        assert_eq!(json["page_num"], 1);
    }

    #[tokio::test]
    async fn get_by_id_returns_user_under_200() {
        let mut users = MockUserUsecase::new();
        users
            .expect_get_by_id()
            .with(eq(1))
            .returning(|id| Ok(sample(id)));

        let (status, json) = send(app(users), get("/v1/user/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response_code"], "PCFG-200");
        assert_eq!(json["data"]["id"], 1);
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let mut users = MockUserUsecase::new();
        users.expect_get_by_id().never();

        let (status, json) = send(app(users), get("/v1/user/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["response_code"], "PCFG-400");
        assert!(json["debug_param"]["debug_param"].is_string());
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn usecase_failure_is_internal_error_with_debug_param() {
        let mut users = MockUserUsecase::new();
        users.expect_get_by_id().returning(|id| {
            Err(AppError::Repo(RepoError::NotFound {
                entity: "User",
                id,
            }))
        });

        let (status, json) = send(app(users), get("/v1/user/42")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["response_code"], "PCFG-500");
        assert_eq!(json["response_message"], "Internal Server Error");
        assert_eq!(
            json["debug_param"]["debug_param"],
            "User with id 42 not found"
        );
    }

    #[tokio::test]
    async fn create_with_malformed_body_is_bad_request() {
        let mut users = MockUserUsecase::new();
        users.expect_create().never();

        let (status, json) =
            send(app(users), with_json("POST", "/v1/user", "{\"email\": 1}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["response_message"], "Bad Request");
        assert_eq!(json["trace_id"], "");
    }

    #[tokio::test]
    async fn update_passes_path_id_and_body() {
        let mut users = MockUserUsecase::new();
        users
            .expect_update()
            .withf(|id, input| *id == 7 && input.email == "new@gmail.com")
            .returning(|id, input| {
                let mut user = sample(id);
                user.apply_update(input);
                Ok(user)
            });

        let body = json!({"email": "new@gmail.com", "firstname": "New"}).to_string();
        let (status, json) = send(app(users), with_json("PUT", "/v1/user/7", &body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["firstname"], "New");
        assert_eq!(json["data"]["lastname"], "");
    }

    #[tokio::test]
    async fn delete_success_has_no_data_field() {
        let mut users = MockUserUsecase::new();
        users.expect_delete().with(eq(3)).returning(|_| Ok(()));

        let request = Request::builder()
            .method("DELETE")
            .uri("/v1/user/3")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(app(users), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response_code"], "PCFG-200");
        assert!(json.get("data").is_none());
    }
}
