//! Shared types for BrandLens: brand identity, configuration, and the
//! follower directory.

use thiserror::Error;

mod app_config;
mod brand;
mod config;
mod followers;

pub use app_config::{AppConfig, Environment, SentimentStrategy, TopicStrategy};
pub use brand::{brand_from_filename, slugify_brand, title_case, BrandIdentity};
pub use config::{load_app_config, load_app_config_from_env};
pub use followers::{load_followers, FollowerDirectory};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read followers file at {path}: {source}")]
    FollowersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse followers file: {0}")]
    FollowersFileParse(#[from] serde_yaml::Error),
}
