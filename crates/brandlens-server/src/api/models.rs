//! Raw artifact access: per-brand engagement view, the generic load-model
//! alias, and the store-wide file listing.

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use brandlens_store::{ModelArtifact, ModelFileInfo, ModelType, StoreError};

use super::{map_store_error, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

pub(super) fn fetch_artifact(
    state: &AppState,
    request_id: &str,
    brand_id: &str,
    model_type: ModelType,
) -> Result<ModelArtifact, ApiError> {
    state
        .store
        .load(brand_id, model_type)
        .map_err(|e| map_store_error(request_id.to_string(), &e))
}

/// `GET /api/brands/{brand_id}/engagement`
pub async fn get_engagement(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_id): Path<String>,
) -> Result<Json<ApiResponse<ModelArtifact>>, ApiError> {
    let artifact = fetch_artifact(&state, &req_id.0, &brand_id, ModelType::Engagement)?;
    Ok(Json(ApiResponse {
        data: artifact,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/load-model/{brand_id}/{model_type}`
///
/// Generic alias over the per-brand views: any of the four model types by
/// name. Unknown type names are client errors, not 404s.
pub async fn load_model(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((brand_id, model_type)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ModelArtifact>>, ApiError> {
    let model_type = ModelType::from_str(&model_type)
        .map_err(|e: StoreError| map_store_error(req_id.0.clone(), &e))?;
    let artifact = fetch_artifact(&state, &req_id.0, &brand_id, model_type)?;
    Ok(Json(ApiResponse {
        data: artifact,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/list-models`
pub async fn list_models(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<ModelFileInfo>>>, ApiError> {
    let files = brandlens_store::list_model_files(&state.store)
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse {
        data: files,
        meta: ResponseMeta::new(req_id.0),
    }))
}
