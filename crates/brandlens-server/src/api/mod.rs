mod brands;
mod hashtags;
mod models;
mod sentiment;
mod topics;
mod upload;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use brandlens_analytics::sentiment::SentimentScorer;
use brandlens_analytics::topics::TopicExtractor;
use brandlens_analytics::AnalyticsError;
use brandlens_core::FollowerDirectory;
use brandlens_store::{ModelStore, StoreError};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub store: ModelStore,
    pub followers: Arc<FollowerDirectory>,
    pub sentiment: Arc<dyn SentimentScorer>,
    pub topics: Arc<dyn TopicExtractor>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "model_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Map store failures onto the API error taxonomy: absent artifacts are 404s,
/// bad model type names are client errors, anything else is internal.
pub(super) fn map_store_error(request_id: String, error: &StoreError) -> ApiError {
    match error {
        StoreError::NotFound { .. } | StoreError::BrandNotFound { .. } => {
            ApiError::new(request_id, "not_found", error.to_string())
        }
        StoreError::InvalidModelType(_) => {
            ApiError::new(request_id, "validation_error", error.to_string())
        }
        _ => {
            tracing::error!(error = %error, "model store operation failed");
            ApiError::new(request_id, "internal_error", "model store operation failed")
        }
    }
}

/// Map analytics failures: a missing pretrained topic model is a 503, the
/// rest are internal errors.
pub(super) fn map_analytics_error(request_id: String, error: &AnalyticsError) -> ApiError {
    match error {
        AnalyticsError::TopicModelUnavailable { .. } => {
            ApiError::new(request_id, "model_unavailable", error.to_string())
        }
        _ => {
            tracing::error!(error = %error, "analytics pipeline failed");
            ApiError::new(request_id, "internal_error", error.to_string())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/upload-csv", post(upload::upload_csv))
        .route("/api/brands", get(brands::list_brands))
        .route("/api/brands/comparison", get(brands::compare_brands))
        .route("/api/brands/{brand_id}", get(brands::get_brand_profile))
        .route(
            "/api/brands/{brand_id}/engagement",
            get(models::get_engagement),
        )
        .route(
            "/api/brands/{brand_id}/sentiment",
            get(sentiment::get_sentiment),
        )
        .route(
            "/api/brands/{brand_id}/sentiment/analyze",
            get(sentiment::analyze_text),
        )
        .route("/api/brands/{brand_id}/topics", get(topics::get_topics))
        .route(
            "/api/brands/{brand_id}/hashtags",
            get(hashtags::get_hashtags),
        )
        .route(
            "/api/brands/{brand_id}/hashtags/trending",
            get(hashtags::get_trending),
        )
        .route(
            "/api/load-model/{brand_id}/{model_type}",
            get(models::load_model),
        )
        .route("/api/list-models", get(models::list_models))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct RootData {
    message: &'static str,
    version: &'static str,
    endpoints: &'static [&'static str],
}

async fn root(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: RootData {
            message: "BrandLens API",
            version: env!("CARGO_PKG_VERSION"),
            endpoints: &[
                "/api/health",
                "/api/upload-csv",
                "/api/brands",
                "/api/brands/comparison",
                "/api/brands/{brand_id}",
                "/api/brands/{brand_id}/engagement",
                "/api/brands/{brand_id}/sentiment",
                "/api/brands/{brand_id}/sentiment/analyze",
                "/api/brands/{brand_id}/topics",
                "/api/brands/{brand_id}/hashtags",
                "/api/brands/{brand_id}/hashtags/trending",
                "/api/load-model/{brand_id}/{model_type}",
                "/api/list-models",
            ],
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use brandlens_analytics::sentiment::KeywordScorer;
    use brandlens_analytics::topics::{FrequencyTopics, UnavailableTopics};

    use super::*;

    pub(crate) fn test_state(dir: &std::path::Path) -> AppState {
        AppState {
            store: ModelStore::open(dir).expect("open test store"),
            followers: Arc::new(FollowerDirectory::default()),
            sentiment: Arc::new(KeywordScorer::new()),
            topics: Arc::new(FrequencyTopics::default()),
        }
    }

    pub(crate) const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

    /// Build a multipart/form-data body with one `file` field.
    pub(crate) fn multipart_body(filename: &str, content: &str) -> (String, String) {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/csv\r\n\r\n{content}\r\n--{BOUNDARY}--\r\n"
        );
        (format!("multipart/form-data; boundary={BOUNDARY}"), body)
    }

    pub(crate) const SAMPLE_CSV: &str = "\
id_str,full_text,created_at,username,favorite_count,retweet_count,reply_count,quote_count\n\
1,I love this amazing show #promo,Wed Oct 10 20:19:24 +0000 2018,netflix,5,0,0,0\n\
2,terrible awful outage #fail #promo,Wed Oct 10 21:00:00 +0000 2018,netflix,100,0,0,0\n\
3,just another tuesday,Thu Oct 11 09:00:00 +0000 2018,netflix,20,0,0,0\n";

    pub(crate) async fn upload_sample(app: &Router, filename: &str) -> serde_json::Value {
        let (content_type, body) = multipart_body(filename, SAMPLE_CSV);
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload-csv")
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK, "upload should succeed");
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let (status, json) = get_json(&app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "ok");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn root_lists_endpoints() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let (status, json) = get_json(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["endpoints"]
            .as_array()
            .expect("endpoints array")
            .iter()
            .any(|e| e == "/api/upload-csv"));
    }

    #[tokio::test]
    async fn upload_persists_four_artifacts_and_reports_summaries() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let json = upload_sample(&app, "Coca Cola.csv").await;

        assert_eq!(json["data"]["brand"]["id"], "coca_cola");
        assert_eq!(json["data"]["brand"]["name"], "Coca Cola");
        assert_eq!(json["data"]["brand"]["total_tweets"], 3);
        assert_eq!(json["data"]["analytics"]["engagement"]["total_engagement"], 125);
        assert!(json["data"]["models_saved"]["topic"]
            .as_str()
            .expect("topic path")
            .ends_with("coca_cola_topic_model.json"));

        let (status, loaded) = get_json(&app, "/api/brands/coca_cola/engagement").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(loaded["data"]["data"]["total_tweets"], 3);
    }

    #[tokio::test]
    async fn upload_rejects_missing_columns() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let (content_type, body) = multipart_body("brand.csv", "id_str,created_at\n1,x\n");
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload-csv")
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upload_rejects_empty_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let (content_type, body) =
            multipart_body("brand.csv", "id_str,full_text,created_at\n");
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload-csv")
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upload_fails_503_when_pretrained_model_missing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut state = test_state(tmp.path());
        state.topics = Arc::new(UnavailableTopics::new("/missing/topic_model.json"));
        let app = build_app(state);

        let (content_type, body) = multipart_body("brand.csv", SAMPLE_CSV);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/upload-csv")
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unknown_brand_profile_is_404() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let (status, json) = get_json(&app, "/api/brands/unknownbrand").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn brands_list_reflects_uploads() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        upload_sample(&app, "netflix_tweets.csv").await;

        let (status, json) = get_json(&app, "/api/brands").await;
        assert_eq!(status, StatusCode::OK);
        let brands = json["data"].as_array().expect("brands array");
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0]["brand_id"], "netflix_tweets");
        assert_eq!(brands[0]["brand_name"], "Netflix Tweets");
        assert_eq!(
            brands[0]["available_models"]
                .as_array()
                .expect("models")
                .len(),
            4
        );
    }

    #[tokio::test]
    async fn comparison_lists_uploaded_brands_side_by_side() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        upload_sample(&app, "netflix.csv").await;
        upload_sample(&app, "disney.csv").await;

        let (status, json) = get_json(&app, "/api/brands/comparison").await;
        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().expect("comparison rows");
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row["total_tweets"], 3);
            assert_eq!(row["total_engagement"], 125);
            assert!(row["engagement_rate"].is_f64() || row["engagement_rate"].is_u64());
            assert!(row["positive_pct"].is_f64() || row["positive_pct"].is_u64());
        }
    }

    #[tokio::test]
    async fn comparison_with_empty_store_is_empty_not_404() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let (status, json) = get_json(&app, "/api/brands/comparison").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"].as_array().expect("rows").is_empty());
    }

    #[tokio::test]
    async fn missing_artifact_returns_404() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let (status, _) = get_json(&app, "/api/brands/nobody/sentiment").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn trending_is_prefix_of_full_hashtag_list() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        upload_sample(&app, "netflix.csv").await;

        let (_, full) = get_json(&app, "/api/brands/netflix/hashtags").await;
        let (_, trending) = get_json(&app, "/api/brands/netflix/hashtags/trending").await;
        let full_tags = full["data"]["data"]["hashtags"].as_array().expect("full list");
        let trend_tags = trending["data"]["trending"].as_array().expect("trending");
        assert!(trend_tags.len() <= 10);
        assert_eq!(&full_tags[..trend_tags.len()], &trend_tags[..]);
        // #promo appears twice, so it leads.
        assert_eq!(trend_tags[0]["hashtag"], "#promo");
    }

    #[tokio::test]
    async fn analyze_endpoint_classifies_without_persisting() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let (status, json) = get_json(
            &app,
            "/api/brands/netflix/sentiment/analyze?text=I%20love%20this%2C%20it%27s%20amazing%21",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["label"], "positive");
        assert_eq!(json["data"]["strategy"], "keyword");

        // Nothing was saved for the brand.
        let (status, _) = get_json(&app, "/api/brands/netflix/sentiment").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn load_model_alias_returns_raw_artifact() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        upload_sample(&app, "disney.csv").await;

        let (status, json) = get_json(&app, "/api/load-model/disney/engagement").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["brand_id"], "disney");
        assert_eq!(json["data"]["model_type"], "engagement");

        let (status, _) = get_json(&app, "/api/load-model/disney/vibes").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_models_enumerates_artifact_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        upload_sample(&app, "disney.csv").await;

        let (status, json) = get_json(&app, "/api/list-models").await;
        assert_eq!(status, StatusCode::OK);
        let files = json["data"].as_array().expect("files array");
        assert_eq!(files.len(), 4);
        assert!(files.iter().all(|f| f["size_bytes"].as_u64().unwrap_or(0) > 0));
    }

    #[tokio::test]
    async fn request_id_header_is_echoed() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let app = build_app(test_state(tmp.path()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
            Some("abc-123")
        );
    }
}
