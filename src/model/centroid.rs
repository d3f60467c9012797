// Centroid calculator — mean TF-IDF vector per category.

use super::corpus::{CorpusModel, DocumentId};
use super::dictionary::Dictionary;
use crate::error::{ClassifierError, Result};

/// Dictionary-aligned TF-IDF vector of a single document.
pub fn document_vector(
    model: &CorpusModel,
    dictionary: &Dictionary,
    id: DocumentId,
) -> Result<Vec<f64>> {
    dictionary.iter().map(|term| model.tfidf(term, id)).collect()
}

/// Mean TF-IDF vector of every document tagged `category`.
///
/// Fails with `EmptyCategory` when no document carries the tag, so callers
/// can never score against an untrained category by accident.
pub fn centroid(model: &CorpusModel, dictionary: &Dictionary, category: &str) -> Result<Vec<f64>> {
    let docs = model.documents_with_category(category);
    if docs.is_empty() {
        return Err(ClassifierError::EmptyCategory(category.to_string()));
    }

    let mut sum = vec![0.0; dictionary.len()];
    for &id in &docs {
        let doc = model.document(id)?;
        // Only this document's own terms contribute; every other position is 0.
        for term in doc.terms() {
            if let Some(pos) = dictionary.position(&term.term) {
                sum[pos] += model.tfidf(&term.term, id)?;
            }
        }
    }

    let n = docs.len() as f64;
    Ok(sum.into_iter().map(|v| v / n).collect())
}

/// Euclidean distance between two vectors of equal length.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
