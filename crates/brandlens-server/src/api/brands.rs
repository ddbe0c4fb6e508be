//! Brand directory endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use brandlens_store::{BrandComparison, BrandProfile, BrandSummary};

use super::{map_store_error, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// `GET /api/brands`
pub async fn list_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<BrandSummary>>>, ApiError> {
    let brands = brandlens_store::list_brands(&state.store, &state.followers)
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: brands,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/brands/comparison`
///
/// Side-by-side engagement and sentiment headline numbers for every brand
/// with a stored engagement artifact.
pub async fn compare_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<BrandComparison>>>, ApiError> {
    let rows = brandlens_store::compare_brands(&state.store)
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/brands/{brand_id}`
///
/// Combined profile across all four model types. Missing sections surface as
/// per-section errors; only a brand with no artifacts at all is a 404.
pub async fn get_brand_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_id): Path<String>,
) -> Result<Json<ApiResponse<BrandProfile>>, ApiError> {
    let profile = brandlens_store::get_profile(&state.store, &brand_id)
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: profile,
        meta: ResponseMeta::new(req_id.0),
    }))
}
