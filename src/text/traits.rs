// Tokenizer trait — swap-ready abstraction.
//
// The corpus model only ever sees token sequences. Anything that can turn
// text into deterministic tokens can stand in for the default stemming
// tokenizer (a different language, a test double, an n-gram splitter).

use crate::error::{ClassifierError, Result};

/// Trait for turning text into an ordered sequence of normalized tokens.
pub trait Tokenizer: Send + Sync {
    /// Split, normalize and stem a piece of text. Must be deterministic.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Decode a raw upload buffer as UTF-8 and tokenize it.
    ///
    /// Invalid UTF-8 is rejected rather than replaced, so a binary file in a
    /// training batch fails the batch instead of adding garbage tokens.
    fn tokenize_bytes(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ClassifierError::Tokenization(format!("document is not valid UTF-8: {e}")))?;
        Ok(self.tokenize(text))
    }
}
