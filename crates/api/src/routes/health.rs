//! Liveness endpoint, answered through the same envelope as the API.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use userdesk_db::RepoError;

use crate::middleware::trace::TraceId;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Envelope `data` for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    /// `ok`, or `degraded` when `SELECT 1` fails.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthStatus {
    fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health
///
/// 200 when `SELECT 1` succeeds. Otherwise 500 with the driver error as
/// `debug_param` and the degraded status still attached as `data`.
async fn health(
    State(state): State<AppState>,
    TraceId(trace_id): TraceId,
) -> ApiResponse<HealthStatus> {
    match userdesk_db::health_check(&state.pool).await {
        Ok(()) => ApiResponse::ok(trace_id, HealthStatus::new(true)),
        Err(err) => {
            let mut response = ApiResponse::failure(trace_id, RepoError::from(err).into());
            response.envelope_mut().data = Some(HealthStatus::new(false));
            response
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;
    use crate::usecases::user::MockUserUsecase;

    #[tokio::test]
    async fn unreachable_database_reports_degraded_under_500() {
        let config = ServerConfig::from_lookup(|key| {
            (key == "DATABASE_URL").then(|| "postgres://127.0.0.1:1/unreachable".to_string())
        })
        .unwrap();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy(&config.database.url)
            .unwrap();
        let state = AppState {
            pool,
            config: Arc::new(config),
            users: Arc::new(MockUserUsecase::new()),
        };
        let app = router().with_state(state);

        let request = Request::builder()
            .uri("/health")
            .header("Trace-ID", "health-1")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["response_code"], "PCFG-500");
        assert_eq!(json["trace_id"], "health-1");
        assert!(json["debug_param"]["debug_param"]
            .as_str()
            .unwrap()
            .starts_with("Database error"));
        assert_eq!(json["data"]["status"], "degraded");
        assert_eq!(json["data"]["db_healthy"], false);
    }

    #[test]
    fn healthy_status_carries_crate_version() {
        let status = HealthStatus::new(true);
        assert_eq!(status.status, "ok");
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
    }
}
