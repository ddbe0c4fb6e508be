use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// The four persisted model types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Engagement,
    Sentiment,
    Topic,
    Hashtags,
}

impl ModelType {
    pub const ALL: [ModelType; 4] = [
        ModelType::Engagement,
        ModelType::Sentiment,
        ModelType::Topic,
        ModelType::Hashtags,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Engagement => "engagement",
            ModelType::Sentiment => "sentiment",
            ModelType::Topic => "topic",
            ModelType::Hashtags => "hashtags",
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "engagement" => Ok(ModelType::Engagement),
            "sentiment" => Ok(ModelType::Sentiment),
            "topic" => Ok(ModelType::Topic),
            "hashtags" => Ok(ModelType::Hashtags),
            other => Err(StoreError::InvalidModelType(other.to_string())),
        }
    }
}

/// Envelope persisted per `(brand_id, model_type)` key.
///
/// `data` holds the report payload as JSON; the envelope is overwritten
/// wholesale on each re-upload, with no version history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub brand_id: String,
    pub brand_name: String,
    pub model_type: ModelType,
    pub created_at: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl ModelArtifact {
    /// Wrap a serializable report in a fresh envelope stamped with now.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serde` if the report fails to serialize.
    pub fn wrap<T: Serialize>(
        brand_id: &str,
        brand_name: &str,
        model_type: ModelType,
        report: &T,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            brand_id: brand_id.to_string(),
            brand_name: brand_name.to_string(),
            model_type,
            created_at: Utc::now(),
            data: serde_json::to_value(report)?,
        })
    }
}
