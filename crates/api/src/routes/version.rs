//! Build and release metadata endpoint.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::config::ServiceInfo;
use crate::state::AppState;

/// Timestamp format of [`VersionResponse::date_time`].
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Field names are part of the public contract, including their mixed casing.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version_release: String,
    #[serde(rename = "ServiceName")]
    pub service_name: String,
    #[serde(rename = "ServiceType")]
    pub service_type: String,
    #[serde(rename = "GitCommit")]
    pub git_commit: String,
    #[serde(rename = "BranchName")]
    pub branch_name: String,
    /// Process start time.
    #[serde(rename = "DateTime")]
    pub date_time: String,
    #[serde(rename = "VersionType")]
    pub version_type: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl From<&ServiceInfo> for VersionResponse {
    fn from(info: &ServiceInfo) -> Self {
        Self {
            version_release: info.version_release.clone(),
            service_name: info.service_name.clone(),
            service_type: info.service_type.clone(),
            git_commit: info.git_commit.clone(),
            branch_name: info.branch_name.clone(),
            date_time: info.started_at.format(DATE_TIME_FORMAT).to_string(),
            version_type: info.version_type.clone(),
            notes: info.notes.clone(),
        }
    }
}

/// GET /version
async fn version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse::from(&state.config.service))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/version", get(version))
}
