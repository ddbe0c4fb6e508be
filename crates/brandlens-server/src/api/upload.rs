//! CSV batch upload: parse, run all four aggregators, persist artifacts.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use serde::Serialize;

use brandlens_analytics::ingest::parse_tweets;
use brandlens_analytics::pipeline::analyze_batch;
use brandlens_analytics::IngestError;
use brandlens_core::brand_from_filename;
use brandlens_store::{ModelArtifact, ModelType};

use super::{map_analytics_error, map_store_error, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub struct UploadData {
    pub message: String,
    pub brand: BrandBlock,
    pub analytics: AnalyticsSummary,
    /// Model type -> artifact file path.
    pub models_saved: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct BrandBlock {
    pub id: String,
    pub name: String,
    pub total_tweets: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub engagement: EngagementSummary,
    pub sentiment: SentimentSummary,
    pub topics: TopicsSummary,
    pub hashtags: HashtagsSummary,
}

#[derive(Debug, Serialize)]
pub struct EngagementSummary {
    pub total_engagement: u64,
    pub avg_engagement: f64,
    pub engagement_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct SentimentSummary {
    pub strategy: String,
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
}

#[derive(Debug, Serialize)]
pub struct TopicsSummary {
    pub strategy: String,
    pub topic_count: usize,
    pub top_keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HashtagsSummary {
    pub unique_hashtags: usize,
    pub top_hashtag: Option<String>,
}

fn map_ingest_error(request_id: String, error: &IngestError) -> ApiError {
    ApiError::new(request_id, "validation_error", error.to_string())
}

/// `POST /api/upload-csv`
///
/// Accepts a multipart form with one `file` field. The brand identity is
/// derived from the uploaded filename; all four artifacts are recomputed and
/// overwrite any previous upload for that brand.
pub async fn upload_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadData>>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::new(req_id.0.clone(), "validation_error", e.to_string())
    })? {
        let Some(filename) = field.file_name().map(String::from) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| {
            ApiError::new(req_id.0.clone(), "validation_error", e.to_string())
        })?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let Some((filename, bytes)) = upload else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "multipart request must include a file field",
        ));
    };

    let brand = brand_from_filename(&filename);
    if brand.id.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!("cannot derive a brand id from filename '{filename}'"),
        ));
    }

    let tweets = parse_tweets(&bytes, &brand.name)
        .map_err(|e| map_ingest_error(req_id.0.clone(), &e))?;
    let followers = state.followers.lookup(&brand.id);

    tracing::info!(
        brand = %brand.id,
        tweets = tweets.len(),
        filename = %filename,
        "processing csv upload"
    );

    let reports = analyze_batch(
        &tweets,
        followers,
        state.sentiment.as_ref(),
        state.topics.as_ref(),
    )
    .map_err(|e| map_analytics_error(req_id.0.clone(), &e))?;

    let mut models_saved = BTreeMap::new();
    let artifacts = [
        ModelArtifact::wrap(&brand.id, &brand.name, ModelType::Engagement, &reports.engagement),
        ModelArtifact::wrap(&brand.id, &brand.name, ModelType::Sentiment, &reports.sentiment),
        ModelArtifact::wrap(&brand.id, &brand.name, ModelType::Topic, &reports.topics),
        ModelArtifact::wrap(&brand.id, &brand.name, ModelType::Hashtags, &reports.hashtags),
    ];
    for artifact in artifacts {
        let artifact = artifact.map_err(|e| map_store_error(req_id.0.clone(), &e))?;
        let model_type = artifact.model_type;
        let path = state
            .store
            .save(&artifact)
            .map_err(|e| map_store_error(req_id.0.clone(), &e))?;
        models_saved.insert(model_type.to_string(), path.display().to_string());
    }

    let data = UploadData {
        message: format!(
            "analyzed {} tweets for {} and saved 4 models",
            tweets.len(),
            brand.name
        ),
        brand: BrandBlock {
            id: brand.id,
            name: brand.name,
            total_tweets: tweets.len(),
            followers,
        },
        analytics: AnalyticsSummary {
            engagement: EngagementSummary {
                total_engagement: reports.engagement.total_engagement,
                avg_engagement: reports.engagement.avg_engagement,
                engagement_rate: reports.engagement.engagement_rate,
            },
            sentiment: SentimentSummary {
                strategy: reports.sentiment.strategy.clone(),
                positive_pct: reports.sentiment.positive_pct,
                neutral_pct: reports.sentiment.neutral_pct,
                negative_pct: reports.sentiment.negative_pct,
            },
            topics: TopicsSummary {
                strategy: reports.topics.strategy.clone(),
                topic_count: reports.topics.topics.len(),
                top_keywords: reports.topics.top_keywords.clone(),
            },
            hashtags: HashtagsSummary {
                unique_hashtags: reports.hashtags.unique_hashtags,
                top_hashtag: reports
                    .hashtags
                    .hashtags
                    .first()
                    .map(|s| s.hashtag.clone()),
            },
        },
        models_saved,
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
