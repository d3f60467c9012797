// MemoryStore — keeps the serialized model in memory.
//
// The model is stored as its persisted record, not as a live CorpusModel, so
// every load goes through the same validation as a file-backed load.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::traits::ModelStore;
use crate::error::Result;
use crate::model::corpus::PersistedModel;
use crate::model::CorpusModel;

#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<Option<PersistedModel>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw stored record, if any.
    pub async fn record(&self) -> Option<PersistedModel> {
        self.record.lock().await.clone()
    }
}

#[async_trait]
impl ModelStore for MemoryStore {
    async fn load(&self) -> Result<Option<CorpusModel>> {
        let record = self.record.lock().await.clone();
        record.map(CorpusModel::from_persisted).transpose()
    }

    async fn save(&self, model: &CorpusModel) -> Result<()> {
        *self.record.lock().await = Some(model.to_persisted());
        Ok(())
    }

    async fn exists(&self) -> Result<bool> {
        Ok(self.record.lock().await.is_some())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
