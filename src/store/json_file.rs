// JsonFileStore — the corpus model as a JSON file on disk.
//
// Writes go to a sibling temp file that is then renamed over the target, so a
// crash mid-write leaves either the old record or the new one, never a
// truncated file. A file that fails to parse is reported as CorruptModel and
// left untouched.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::traits::ModelStore;
use crate::error::{ClassifierError, Result};
use crate::model::corpus::PersistedModel;
use crate::model::CorpusModel;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "model".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Parse a model record from JSON text.
pub fn parse_model(json: &str) -> Result<CorpusModel> {
    let record: PersistedModel = serde_json::from_str(json)
        .map_err(|e| ClassifierError::CorruptModel(format!("invalid JSON: {e}")))?;
    CorpusModel::from_persisted(record)
}

/// Render a model record as pretty-printed JSON.
pub fn render_model(model: &CorpusModel) -> Result<String> {
    let json = serde_json::to_string_pretty(&model.to_persisted())
        .context("Failed to serialize corpus model")?;
    Ok(json)
}

#[async_trait]
impl ModelStore for JsonFileStore {
    async fn load(&self) -> Result<Option<CorpusModel>> {
        if !tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to check model file {}", self.path.display()))?
        {
            debug!(path = %self.path.display(), "No model file yet");
            return Ok(None);
        }

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read model file {}", self.path.display()))?;
        let model = parse_model(&json)?;

        debug!(
            path = %self.path.display(),
            documents = model.document_count(),
            "Loaded corpus model"
        );
        Ok(Some(model))
    }

    async fn save(&self, model: &CorpusModel) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create directory for model file: {}", self.path.display())
                })?;
            }
        }

        let json = render_model(model)?;
        let tmp = self.temp_path();
        let mut file = tokio::fs::File::create(&tmp)
            .await
            .with_context(|| format!("Failed to create {}", tmp.display()))?;
        file.write_all(json.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        // Data must be on disk before the rename makes it the model file.
        file.sync_all()
            .await
            .with_context(|| format!("Failed to flush {}", tmp.display()))?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace model file {}", self.path.display()))?;

        info!(
            path = %self.path.display(),
            documents = model.document_count(),
            "Saved corpus model"
        );
        Ok(())
    }

    async fn exists(&self) -> Result<bool> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to check model file {}", self.path.display()))?;
        Ok(exists)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
