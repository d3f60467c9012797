// Model store trait — backend-agnostic async interface to the durable model.
//
// Implementors: JsonFileStore (a JSON file on disk), MemoryStore (in-process,
// used by tests and by embedders that handle persistence themselves).

use async_trait::async_trait;

use crate::error::Result;
use crate::model::CorpusModel;

#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Load the stored model, or `None` if nothing has been saved yet.
    ///
    /// A record that exists but cannot be parsed is `CorruptModel`.
    async fn load(&self) -> Result<Option<CorpusModel>>;

    /// Replace the stored model with `model`.
    async fn save(&self, model: &CorpusModel) -> Result<()>;

    /// Whether a model has been saved.
    async fn exists(&self) -> Result<bool>;

    /// Human-readable location, for status output and logs.
    fn describe(&self) -> String;
}
