// Nearest-centroid classifier.
//
// The query is appended as an untagged document to a private copy of the
// corpus, so its terms enter the dictionary and the IDF statistics exactly
// like a stored document would. Each category's centroid is computed over
// that extended snapshot and the categories are ranked by Euclidean distance
// to the query vector. The caller's model is never modified.

use serde::Serialize;
use tracing::debug;

use super::centroid::{centroid, document_vector, euclidean_distance};
use super::corpus::CorpusModel;
use super::dictionary::build_dictionary;
use crate::error::{ClassifierError, Result};
use crate::text::traits::Tokenizer;

/// One category and its distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCategory {
    pub category: String,
    pub distance: f64,
}

/// Categories ordered by ascending distance; the head is the assigned one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<ScoredCategory>,
}

impl Ranking {
    /// The nearest category.
    pub fn winner(&self) -> &ScoredCategory {
        // classify() refuses an empty category list, so there is always a head.
        &self.entries[0]
    }

    pub fn entries(&self) -> &[ScoredCategory] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distance for a given category, if it was scored.
    pub fn distance_to(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.distance)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCategory> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a ScoredCategory;
    type IntoIter = std::slice::Iter<'a, ScoredCategory>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Tokenize `text` and rank `categories` by distance to it.
pub fn classify<S: AsRef<str>>(
    model: &CorpusModel,
    tokenizer: &dyn Tokenizer,
    text: &str,
    categories: &[S],
) -> Result<Ranking> {
    let tokens = tokenizer.tokenize(text);
    classify_tokens(model, &tokens, categories)
}

/// Rank `categories` by distance to an already tokenized query.
///
/// Ties keep the order of `categories`. Any category without training
/// documents aborts the whole ranking with `EmptyCategory`.
pub fn classify_tokens<S: AsRef<str>>(
    model: &CorpusModel,
    tokens: &[String],
    categories: &[S],
) -> Result<Ranking> {
    if categories.is_empty() {
        return Err(ClassifierError::InvalidInput(
            "at least one category is required".to_string(),
        ));
    }

    let (extended, query) = model.with_query(tokens);
    let dictionary = build_dictionary(&extended);
    let query_vector = document_vector(&extended, &dictionary, query)?;

    let mut entries = Vec::with_capacity(categories.len());
    for category in categories {
        let category = category.as_ref();
        let center = centroid(&extended, &dictionary, category)?;
        entries.push(ScoredCategory {
            category: category.to_string(),
            distance: euclidean_distance(&center, &query_vector),
        });
    }

    // sort_by is stable, so equal distances keep the caller's order
    entries.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    debug!(
        query_tokens = tokens.len(),
        dimensions = dictionary.len(),
        winner = %entries[0].category,
        distance = entries[0].distance,
        "Ranked categories"
    );

    Ok(Ranking { entries })
}
