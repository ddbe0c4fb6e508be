//! Topic report endpoint.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use brandlens_store::{ModelArtifact, ModelType};

use super::models::fetch_artifact;
use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// `GET /api/brands/{brand_id}/topics`
pub async fn get_topics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_id): Path<String>,
) -> Result<Json<ApiResponse<ModelArtifact>>, ApiError> {
    let artifact = fetch_artifact(&state, &req_id.0, &brand_id, ModelType::Topic)?;
    Ok(Json(ApiResponse {
        data: artifact,
        meta: ResponseMeta::new(req_id.0),
    }))
}
