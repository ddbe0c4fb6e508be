use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;

use crate::artifact::{ModelArtifact, ModelType};
use crate::StoreError;

/// One artifact file found in the store's namespace.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub brand_id: String,
    pub model_type: ModelType,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// File-backed model store.
///
/// Artifacts live at `{dir}/{brand_id}_{model_type}_model.json`. Saving
/// writes a temp file in the same directory and renames it over the target,
/// so a reader never observes a partially written artifact. Concurrent
/// writes to the same key race; last rename wins.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn artifact_path(&self, brand_id: &str, model_type: ModelType) -> PathBuf {
        self.dir
            .join(format!("{brand_id}_{model_type}_model.json"))
    }

    /// Persist an artifact, overwriting any prior artifact under the same
    /// `(brand_id, model_type)` key. Returns the final path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on serialization or I/O failure.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<PathBuf, StoreError> {
        let path = self.artifact_path(&artifact.brand_id, artifact.model_type);
        let tmp = path.with_extension("json.tmp");

        let json = serde_json::to_vec_pretty(artifact)?;
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(
            brand = %artifact.brand_id,
            model_type = %artifact.model_type,
            path = %path.display(),
            "saved model artifact"
        );
        Ok(path)
    }

    /// Load the artifact stored under `(brand_id, model_type)`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when absent, or `StoreError` on
    /// read/parse failure.
    pub fn load(&self, brand_id: &str, model_type: ModelType) -> Result<ModelArtifact, StoreError> {
        let path = self.artifact_path(brand_id, model_type);
        if !path.exists() {
            return Err(StoreError::NotFound {
                brand_id: brand_id.to_string(),
                model_type,
            });
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Scan the store directory for artifact files.
    ///
    /// Files not matching the artifact naming scheme are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be read.
    pub fn entries(&self) -> Result<Vec<StoredEntry>, StoreError> {
        let re = Regex::new(r"^(.+?)_(engagement|sentiment|topic|hashtags)_model\.json$")
            .expect("valid artifact filename regex");

        let mut entries = Vec::new();
        for item in fs::read_dir(&self.dir)? {
            let item = item?;
            let file_name = item.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(caps) = re.captures(name) else {
                continue;
            };

            let model_type = ModelType::from_str(&caps[2])
                .expect("regex alternation only matches known model types");
            entries.push(StoredEntry {
                brand_id: caps[1].to_string(),
                model_type,
                path: item.path(),
                size_bytes: item.metadata()?.len(),
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn artifact(brand_id: &str, model_type: ModelType) -> ModelArtifact {
        ModelArtifact::wrap(
            brand_id,
            "Test Brand",
            model_type,
            &json!({"total_tweets": 3}),
        )
        .unwrap()
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ModelStore::open(tmp.path()).unwrap();

        for mt in ModelType::ALL {
            let original = artifact("netflix", mt);
            store.save(&original).unwrap();
            let loaded = store.load("netflix", mt).unwrap();
            assert_eq!(loaded, original, "round trip failed for {mt}");
        }
    }

    #[test]
    fn save_overwrites_prior_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ModelStore::open(tmp.path()).unwrap();

        let mut first = artifact("netflix", ModelType::Engagement);
        first.data = json!({"total_tweets": 1});
        store.save(&first).unwrap();

        let mut second = artifact("netflix", ModelType::Engagement);
        second.data = json!({"total_tweets": 2});
        store.save(&second).unwrap();

        let loaded = store.load("netflix", ModelType::Engagement).unwrap();
        assert_eq!(loaded.data["total_tweets"], 2);
    }

    #[test]
    fn load_missing_artifact_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ModelStore::open(tmp.path()).unwrap();
        let err = store.load("ghost", ModelType::Sentiment).unwrap_err();
        assert!(
            matches!(err, StoreError::NotFound { ref brand_id, model_type }
                if brand_id == "ghost" && model_type == ModelType::Sentiment)
        );
    }

    #[test]
    fn artifact_path_matches_naming_scheme() {
        let store = ModelStore { dir: PathBuf::from("/data/models") };
        assert_eq!(
            store.artifact_path("coca_cola", ModelType::Topic),
            PathBuf::from("/data/models/coca_cola_topic_model.json")
        );
    }

    #[test]
    fn entries_lists_only_artifact_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ModelStore::open(tmp.path()).unwrap();
        store.save(&artifact("netflix", ModelType::Engagement)).unwrap();
        store.save(&artifact("disney", ModelType::Hashtags)).unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "ignore me").unwrap();
        std::fs::write(tmp.path().join("topic_model.json"), "{}").unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.brand_id == "netflix"
            && e.model_type == ModelType::Engagement
            && e.size_bytes > 0));
        assert!(entries
            .iter()
            .any(|e| e.brand_id == "disney" && e.model_type == ModelType::Hashtags));
    }

    #[test]
    fn no_temp_file_remains_after_save() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ModelStore::open(tmp.path()).unwrap();
        store.save(&artifact("netflix", ModelType::Topic)).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
