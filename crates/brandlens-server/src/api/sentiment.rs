//! Sentiment endpoints: stored report plus on-demand single-text analysis.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use brandlens_store::{ModelArtifact, ModelType};

use super::models::fetch_artifact;
use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// `GET /api/brands/{brand_id}/sentiment`
pub async fn get_sentiment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_id): Path<String>,
) -> Result<Json<ApiResponse<ModelArtifact>>, ApiError> {
    let artifact = fetch_artifact(&state, &req_id.0, &brand_id, ModelType::Sentiment)?;
    Ok(Json(ApiResponse {
        data: artifact,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeData {
    pub brand_id: String,
    pub text: String,
    pub label: brandlens_analytics::sentiment::SentimentLabel,
    pub score: f64,
    pub strategy: &'static str,
}

/// `GET /api/brands/{brand_id}/sentiment/analyze?text=...`
///
/// Classifies one text with the same scorer instance that serves uploads.
/// Nothing is persisted and the brand does not need any stored models.
pub async fn analyze_text(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(brand_id): Path<String>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<ApiResponse<AnalyzeData>>, ApiError> {
    if query.text.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "text query parameter must not be empty",
        ));
    }

    let scored = state.sentiment.score(&query.text);
    Ok(Json(ApiResponse {
        data: AnalyzeData {
            brand_id,
            text: query.text,
            label: scored.label,
            score: scored.score,
            strategy: state.sentiment.name(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
