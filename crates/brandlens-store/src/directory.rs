//! Brand directory: enumeration and combined-profile assembly over the
//! store's namespace.

use std::collections::BTreeMap;

use serde::Serialize;

use brandlens_core::{title_case, FollowerDirectory};

use crate::artifact::ModelType;
use crate::store::ModelStore;
use crate::StoreError;

#[derive(Debug, Clone, Serialize)]
pub struct BrandSummary {
    pub brand_id: String,
    pub brand_name: String,
    pub followers: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tweets: Option<u64>,
    pub available_models: Vec<String>,
}

/// Combined profile: every available section plus per-section errors for the
/// missing ones.
#[derive(Debug, Clone, Serialize)]
pub struct BrandProfile {
    pub brand_id: String,
    pub brand_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

/// One row of the cross-brand comparison: headline engagement numbers plus
/// sentiment shares when that artifact exists.
#[derive(Debug, Clone, Serialize)]
pub struct BrandComparison {
    pub brand_id: String,
    pub brand_name: String,
    pub total_tweets: Option<u64>,
    pub total_engagement: Option<u64>,
    pub engagement_rate: Option<f64>,
    pub positive_pct: Option<f64>,
    pub neutral_pct: Option<f64>,
    pub negative_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelFileInfo {
    pub filename: String,
    pub path: String,
    pub size_bytes: u64,
    pub size_kb: f64,
}

/// Enumerate brands by scanning the store's namespace.
///
/// Brand name comes from any loadable artifact, else the title-cased id;
/// total tweets from the engagement artifact when present. Artifact files
/// that fail to load are skipped with a warning.
///
/// # Errors
///
/// Returns `StoreError::Io` if the store directory cannot be scanned.
pub fn list_brands(
    store: &ModelStore,
    followers: &FollowerDirectory,
) -> Result<Vec<BrandSummary>, StoreError> {
    let mut grouped: BTreeMap<String, Vec<ModelType>> = BTreeMap::new();
    for entry in store.entries()? {
        grouped.entry(entry.brand_id).or_default().push(entry.model_type);
    }

    let mut brands = Vec::with_capacity(grouped.len());
    for (brand_id, model_types) in grouped {
        let mut brand_name = None;
        let mut total_tweets = None;

        for &model_type in &model_types {
            match store.load(&brand_id, model_type) {
                Ok(artifact) => {
                    brand_name.get_or_insert(artifact.brand_name);
                    if model_type == ModelType::Engagement {
                        total_tweets = artifact.data.get("total_tweets").and_then(
                            serde_json::Value::as_u64,
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(brand = %brand_id, model_type = %model_type, error = %e,
                        "skipping unreadable artifact during brand scan");
                }
            }
        }

        let mut available_models: Vec<String> =
            model_types.iter().map(|mt| mt.to_string()).collect();
        available_models.sort();
        available_models.dedup();

        brands.push(BrandSummary {
            brand_name: brand_name.unwrap_or_else(|| title_case(&brand_id.replace('_', " "))),
            followers: followers.lookup_or_zero(&brand_id),
            total_tweets,
            available_models,
            brand_id,
        });
    }

    Ok(brands)
}

/// Assemble the combined profile for one brand.
///
/// Each of the four model types is loaded independently; a missing type
/// becomes an entry in `errors` rather than failing the profile.
///
/// # Errors
///
/// Returns `StoreError::BrandNotFound` only when no model type at all exists
/// for the brand.
pub fn get_profile(store: &ModelStore, brand_id: &str) -> Result<BrandProfile, StoreError> {
    let mut profile = BrandProfile {
        brand_id: brand_id.to_string(),
        brand_name: String::new(),
        engagement: None,
        sentiment: None,
        topics: None,
        hashtags: None,
        errors: BTreeMap::new(),
    };
    let mut brand_name = None;

    for model_type in ModelType::ALL {
        match store.load(brand_id, model_type) {
            Ok(artifact) => {
                brand_name.get_or_insert(artifact.brand_name);
                let section = match model_type {
                    ModelType::Engagement => &mut profile.engagement,
                    ModelType::Sentiment => &mut profile.sentiment,
                    ModelType::Topic => &mut profile.topics,
                    ModelType::Hashtags => &mut profile.hashtags,
                };
                *section = Some(artifact.data);
            }
            Err(e @ StoreError::NotFound { .. }) => {
                profile.errors.insert(model_type.to_string(), e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    match brand_name {
        Some(name) => {
            profile.brand_name = name;
            Ok(profile)
        }
        None => Err(StoreError::BrandNotFound {
            brand_id: brand_id.to_string(),
        }),
    }
}

/// Cross-brand comparison over every brand with an engagement artifact.
///
/// Rows come from the engagement artifacts; the sentiment percentages join
/// in when that brand also has a sentiment artifact, otherwise they are
/// null. Brands whose engagement artifact fails to load are skipped with a
/// warning.
///
/// # Errors
///
/// Returns `StoreError::Io` if the store directory cannot be scanned.
pub fn compare_brands(store: &ModelStore) -> Result<Vec<BrandComparison>, StoreError> {
    let mut rows = Vec::new();

    for entry in store.entries()? {
        if entry.model_type != ModelType::Engagement {
            continue;
        }

        let engagement = match store.load(&entry.brand_id, ModelType::Engagement) {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::warn!(brand = %entry.brand_id, error = %e,
                    "skipping unreadable engagement artifact during comparison");
                continue;
            }
        };
        let sentiment = store.load(&entry.brand_id, ModelType::Sentiment).ok();

        let num = |data: &serde_json::Value, key: &str| data.get(key).and_then(serde_json::Value::as_f64);
        let sentiment_pct =
            |key: &str| sentiment.as_ref().and_then(|a| num(&a.data, key));

        rows.push(BrandComparison {
            brand_id: entry.brand_id,
            brand_name: engagement.brand_name,
            total_tweets: engagement.data.get("total_tweets").and_then(serde_json::Value::as_u64),
            total_engagement: engagement
                .data
                .get("total_engagement")
                .and_then(serde_json::Value::as_u64),
            engagement_rate: num(&engagement.data, "engagement_rate"),
            positive_pct: sentiment_pct("positive_pct"),
            neutral_pct: sentiment_pct("neutral_pct"),
            negative_pct: sentiment_pct("negative_pct"),
        });
    }

    Ok(rows)
}

/// Enumerate persisted artifact files with size metadata.
///
/// # Errors
///
/// Returns `StoreError::Io` if the store directory cannot be scanned.
pub fn list_model_files(store: &ModelStore) -> Result<Vec<ModelFileInfo>, StoreError> {
    Ok(store
        .entries()?
        .into_iter()
        .map(|entry| {
            let filename = entry
                .path
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            #[allow(clippy::cast_precision_loss)]
            let size_kb = (entry.size_bytes as f64 / 1024.0 * 100.0).round() / 100.0;
            ModelFileInfo {
                filename,
                path: entry.path.display().to_string(),
                size_bytes: entry.size_bytes,
                size_kb,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use crate::artifact::ModelArtifact;

    use super::*;

    fn store_with(brands: &[(&str, &str, ModelType, serde_json::Value)]) -> (tempfile::TempDir, ModelStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = ModelStore::open(tmp.path()).unwrap();
        for (id, name, mt, data) in brands {
            let artifact = ModelArtifact::wrap(id, name, *mt, data).unwrap();
            store.save(&artifact).unwrap();
        }
        (tmp, store)
    }

    #[test]
    fn list_brands_groups_by_brand_id() {
        let (_tmp, store) = store_with(&[
            ("netflix", "Netflix", ModelType::Engagement, json!({"total_tweets": 42})),
            ("netflix", "Netflix", ModelType::Sentiment, json!({})),
            ("disney", "Disney", ModelType::Hashtags, json!({})),
        ]);

        let brands = list_brands(&store, &FollowerDirectory::default()).unwrap();
        assert_eq!(brands.len(), 2);

        let netflix = brands.iter().find(|b| b.brand_id == "netflix").unwrap();
        assert_eq!(netflix.brand_name, "Netflix");
        assert_eq!(netflix.total_tweets, Some(42));
        assert_eq!(netflix.available_models, vec!["engagement", "sentiment"]);

        let disney = brands.iter().find(|b| b.brand_id == "disney").unwrap();
        assert_eq!(disney.total_tweets, None);
        assert_eq!(disney.available_models, vec!["hashtags"]);
    }

    #[test]
    fn list_brands_pulls_followers_from_directory() {
        let (_tmp, store) = store_with(&[(
            "netflix",
            "Netflix",
            ModelType::Engagement,
            json!({"total_tweets": 1}),
        )]);
        let mut counts = HashMap::new();
        counts.insert("netflix".to_string(), 232_000_000_u64);

        let brands = list_brands(&store, &FollowerDirectory::new(counts)).unwrap();
        assert_eq!(brands[0].followers, 232_000_000);
    }

    #[test]
    fn profile_collects_sections_and_errors() {
        let (_tmp, store) = store_with(&[
            ("netflix", "Netflix", ModelType::Engagement, json!({"total_tweets": 5})),
            ("netflix", "Netflix", ModelType::Topic, json!({"topics": []})),
        ]);

        let profile = get_profile(&store, "netflix").unwrap();
        assert_eq!(profile.brand_name, "Netflix");
        assert!(profile.engagement.is_some());
        assert!(profile.topics.is_some());
        assert!(profile.sentiment.is_none());
        assert!(profile.hashtags.is_none());
        assert_eq!(profile.errors.len(), 2);
        assert!(profile.errors.contains_key("sentiment"));
        assert!(profile.errors.contains_key("hashtags"));
    }

    #[test]
    fn profile_for_unknown_brand_is_brand_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ModelStore::open(tmp.path()).unwrap();
        let err = get_profile(&store, "unknownbrand").unwrap_err();
        assert!(matches!(err, StoreError::BrandNotFound { ref brand_id } if brand_id == "unknownbrand"));
    }

    #[test]
    fn comparison_joins_engagement_and_sentiment() {
        let (_tmp, store) = store_with(&[
            (
                "netflix",
                "Netflix",
                ModelType::Engagement,
                json!({"total_tweets": 3, "total_engagement": 125, "engagement_rate": 41.67}),
            ),
            (
                "netflix",
                "Netflix",
                ModelType::Sentiment,
                json!({"positive_pct": 33.33, "neutral_pct": 33.33, "negative_pct": 33.33}),
            ),
            (
                "disney",
                "Disney",
                ModelType::Engagement,
                json!({"total_tweets": 1, "total_engagement": 10, "engagement_rate": 1000.0}),
            ),
        ]);

        let rows = compare_brands(&store).unwrap();
        assert_eq!(rows.len(), 2);

        let netflix = rows.iter().find(|r| r.brand_id == "netflix").unwrap();
        assert_eq!(netflix.total_engagement, Some(125));
        assert_eq!(netflix.engagement_rate, Some(41.67));
        assert_eq!(netflix.positive_pct, Some(33.33));

        // Disney has no sentiment artifact, so its shares are null.
        let disney = rows.iter().find(|r| r.brand_id == "disney").unwrap();
        assert_eq!(disney.total_engagement, Some(10));
        assert_eq!(disney.positive_pct, None);
        assert_eq!(disney.neutral_pct, None);
    }

    #[test]
    fn comparison_skips_brands_without_engagement() {
        let (_tmp, store) = store_with(&[(
            "netflix",
            "Netflix",
            ModelType::Hashtags,
            json!({"hashtags": []}),
        )]);
        assert!(compare_brands(&store).unwrap().is_empty());
    }

    #[test]
    fn list_model_files_reports_sizes() {
        let (_tmp, store) = store_with(&[(
            "netflix",
            "Netflix",
            ModelType::Engagement,
            json!({"total_tweets": 5}),
        )]);
        let files = list_model_files(&store).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "netflix_engagement_model.json");
        assert!(files[0].size_bytes > 0);
        assert!(files[0].size_kb > 0.0);
    }
}
