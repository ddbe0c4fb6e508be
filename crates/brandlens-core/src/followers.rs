use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Known follower counts keyed by brand id.
///
/// Brands absent from the directory report zero followers; the engagement
/// rate formula changes based on availability, so the count travels with the
/// report.
#[derive(Debug, Clone, Default)]
pub struct FollowerDirectory {
    counts: HashMap<String, u64>,
}

#[derive(Debug, Deserialize)]
struct FollowersFile {
    followers: HashMap<String, u64>,
}

impl FollowerDirectory {
    #[must_use]
    pub fn new(counts: HashMap<String, u64>) -> Self {
        Self { counts }
    }

    /// Follower count for a brand id, or `None` when unknown.
    #[must_use]
    pub fn lookup(&self, brand_id: &str) -> Option<u64> {
        self.counts.get(brand_id).copied()
    }

    /// Follower count for a brand id, defaulting to 0 when unknown.
    #[must_use]
    pub fn lookup_or_zero(&self, brand_id: &str) -> u64 {
        self.lookup(brand_id).unwrap_or(0)
    }
}

/// Load the follower directory from a YAML file.
///
/// A missing file is not an error: the directory starts empty and every
/// brand defaults to zero followers.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_followers(path: &Path) -> Result<FollowerDirectory, ConfigError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "followers file missing; all brands default to 0");
        return Ok(FollowerDirectory::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FollowersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: FollowersFile = serde_yaml::from_str(&content)?;
    Ok(FollowerDirectory::new(file.followers))
}
