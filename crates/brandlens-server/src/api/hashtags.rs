//! Hashtag endpoints: stored report and the trending top-10 view.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use brandlens_analytics::hashtags::{HashtagReport, HashtagStat};
use brandlens_store::{ModelArtifact, ModelType};

use super::models::fetch_artifact;
use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// `GET /api/brands/{brand_id}/hashtags`
pub async fn get_hashtags(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_id): Path<String>,
) -> Result<Json<ApiResponse<ModelArtifact>>, ApiError> {
    let artifact = fetch_artifact(&state, &req_id.0, &brand_id, ModelType::Hashtags)?;
    Ok(Json(ApiResponse {
        data: artifact,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Serialize)]
pub struct TrendingData {
    pub brand_id: String,
    pub unique_hashtags: usize,
    pub trending: Vec<HashtagStat>,
}

/// `GET /api/brands/{brand_id}/hashtags/trending`
///
/// Top-10 prefix of the stored hashtag report. Derived from the artifact at
/// read time, so it always agrees with the full list.
pub async fn get_trending(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_id): Path<String>,
) -> Result<Json<ApiResponse<TrendingData>>, ApiError> {
    let artifact = fetch_artifact(&state, &req_id.0, &brand_id, ModelType::Hashtags)?;
    let report: HashtagReport = serde_json::from_value(artifact.data).map_err(|e| {
        tracing::error!(brand = %brand_id, error = %e, "stored hashtag artifact is malformed");
        ApiError::new(
            req_id.0.clone(),
            "internal_error",
            "stored hashtag artifact is malformed",
        )
    })?;

    Ok(Json(ApiResponse {
        data: TrendingData {
            brand_id,
            unique_hashtags: report.unique_hashtags,
            trending: report.trending().to_vec(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
