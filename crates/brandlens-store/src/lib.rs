//! File-backed artifact persistence for BrandLens.
//!
//! Each analytic report is stored as one JSON artifact keyed by
//! `(brand_id, model_type)`. Writes replace the previous artifact atomically
//! (temp file + rename); there is deliberately no cross-artifact transaction,
//! so a reader racing an upload may see a mixed set for a brand.

mod artifact;
mod directory;
mod store;

use thiserror::Error;

pub use artifact::{ModelArtifact, ModelType};
pub use directory::{
    compare_brands, get_profile, list_brands, list_model_files, BrandComparison, BrandProfile,
    BrandSummary, ModelFileInfo,
};
pub use store::{ModelStore, StoredEntry};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("model {model_type} for brand '{brand_id}' not found")]
    NotFound {
        brand_id: String,
        model_type: ModelType,
    },

    #[error("brand '{brand_id}' has no models")]
    BrandNotFound { brand_id: String },

    #[error("unknown model type: {0}")]
    InvalidModelType(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
