// Dictionary builder — the global vocabulary that defines vector positions.
//
// Rebuilt from scratch for every corpus snapshot. Centroids and query vectors
// must always be indexed against the dictionary built from the same snapshot.

use std::collections::HashMap;

use super::corpus::CorpusModel;

/// Ordered set of distinct tokens, first-seen across documents in id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    terms: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Dictionary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Vector position of `term`, if it is in the vocabulary.
    pub fn position(&self, term: &str) -> Option<usize> {
        self.positions.get(term).copied()
    }

    fn push(&mut self, term: &str) {
        if !self.positions.contains_key(term) {
            self.positions.insert(term.to_string(), self.terms.len());
            self.terms.push(term.to_string());
        }
    }
}

/// Build the dictionary for a corpus snapshot.
pub fn build_dictionary(model: &CorpusModel) -> Dictionary {
    let mut dictionary = Dictionary::default();
    for doc in model.documents() {
        for term in doc.terms() {
            dictionary.push(&term.term);
        }
    }
    dictionary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_empty_model_has_empty_dictionary() {
        let dictionary = build_dictionary(&CorpusModel::new());
        assert!(dictionary.is_empty());
    }

    #[test]
    fn test_first_seen_order_across_documents() {
        let mut model = CorpusModel::new();
        model.add_document(&tokens("match goal goal"), Some("sport"));
        model.add_document(&tokens("code goal server"), Some("tech"));
        model.add_document(&tokens("match bug"), None);

        let dictionary = build_dictionary(&model);
        assert_eq!(
            dictionary.terms(),
            &["match", "goal", "code", "server", "bug"]
        );
        assert_eq!(dictionary.position("server"), Some(3));
        assert_eq!(dictionary.position("missing"), None);
    }

    #[test]
    fn test_rebuilt_after_mutation() {
        let mut model = CorpusModel::new();
        model.add_document(&tokens("a"), None);
        let before = build_dictionary(&model);
        model.add_document(&tokens("b"), None);
        let after = build_dictionary(&model);
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }
}
