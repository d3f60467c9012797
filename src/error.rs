// Error taxonomy for the classification core.
//
// Every failure the caller might want to react to differently gets its own
// variant. Storage and database plumbing errors arrive as anyhow::Error and
// are carried through transparently.

use thiserror::Error;

use crate::model::corpus::DocumentId;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Classification was requested before any training run produced a model.
    #[error("No trained model found. Train at least one category before classifying.")]
    NoTrainedModel,

    /// A requested category has no training documents.
    #[error("Category '{0}' has no training documents")]
    EmptyCategory(String),

    /// The persisted model record could not be parsed or failed validation.
    #[error("Stored model is corrupt: {0}")]
    CorruptModel(String),

    /// A document could not be turned into tokens (e.g. invalid UTF-8).
    #[error("Failed to tokenize document: {0}")]
    Tokenization(String),

    /// A document id outside the corpus was addressed.
    #[error("Document {id} is out of range (corpus has {count} documents)")]
    OutOfRange { id: DocumentId, count: usize },

    /// Caller-supplied arguments were rejected before any work was done.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The service was used after `close()`.
    #[error("Classifier service is closed")]
    ServiceClosed,

    /// I/O or database failure from a storage collaborator.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    /// True for conditions the user can fix by training (as opposed to
    /// storage faults or bugs).
    pub fn needs_training(&self) -> bool {
        matches!(
            self,
            ClassifierError::NoTrainedModel | ClassifierError::EmptyCategory(_)
        )
    }
}
