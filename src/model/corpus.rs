// Corpus model — the ordered document collection behind every TF-IDF query.
//
// Documents get a dense, zero-based DocumentId at insertion time and are never
// modified afterwards. Each document keeps its token counts in first-seen
// order, which is what makes the dictionary order reproducible after a
// save/load cycle. The corpus also keeps a document-frequency table so IDF
// lookups don't have to scan every document.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// Version tag written into every persisted model record.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Stable identifier of a document within one corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(usize);

impl DocumentId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One token and how many times it occurs in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: u32,
}

/// A single document: token counts plus an optional category tag.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    category: Option<String>,
    /// Distinct terms in first-seen order.
    terms: Vec<TermCount>,
    /// term -> position in `terms`
    lookup: HashMap<String, usize>,
}

impl Document {
    fn from_tokens(id: DocumentId, tokens: &[String], category: Option<String>) -> Self {
        let mut terms: Vec<TermCount> = Vec::new();
        let mut lookup: HashMap<String, usize> = HashMap::new();

        for token in tokens {
            match lookup.get(token) {
                Some(&pos) => terms[pos].count += 1,
                None => {
                    lookup.insert(token.clone(), terms.len());
                    terms.push(TermCount {
                        term: token.clone(),
                        count: 1,
                    });
                }
            }
        }

        Self {
            id,
            category,
            terms,
            lookup,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Distinct terms with their counts, in first-seen order.
    pub fn terms(&self) -> &[TermCount] {
        &self.terms
    }

    /// Raw occurrence count of `term` in this document (0 if absent).
    pub fn count(&self, term: &str) -> u32 {
        self.lookup
            .get(term)
            .map(|&pos| self.terms[pos].count)
            .unwrap_or(0)
    }
}

/// Smoothed inverse document frequency: `1 + ln(N / (1 + df))`.
///
/// The `+1` in the denominator keeps this finite for any df. A term present in
/// every document is not zeroed out; it keeps the weight `1 + ln(N / (N + 1))`.
pub fn idf(document_frequency: usize, total_documents: usize) -> f64 {
    1.0 + (total_documents as f64 / (1.0 + document_frequency as f64)).ln()
}

/// Ordered collection of documents with document-frequency bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct CorpusModel {
    documents: Vec<Document>,
    document_frequency: HashMap<String, usize>,
}

impl CorpusModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document and return its id.
    pub fn add_document(&mut self, tokens: &[String], category: Option<&str>) -> DocumentId {
        let id = DocumentId(self.documents.len());
        let doc = Document::from_tokens(id, tokens, category.map(str::to_string));

        for term in &doc.terms {
            *self
                .document_frequency
                .entry(term.term.clone())
                .or_insert(0) += 1;
        }

        self.documents.push(doc);
        id
    }

    /// Return a copy of this corpus with one extra untagged document appended.
    ///
    /// Used to score a query without touching the loaded model.
    pub fn with_query(&self, tokens: &[String]) -> (CorpusModel, DocumentId) {
        let mut extended = self.clone();
        let id = extended.add_document(tokens, None);
        (extended, id)
    }

    pub fn document(&self, id: DocumentId) -> Result<&Document> {
        self.documents
            .get(id.0)
            .ok_or(ClassifierError::OutOfRange {
                id,
                count: self.documents.len(),
            })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Raw count of `token` in the document `id`.
    pub fn term_frequency(&self, token: &str, id: DocumentId) -> Result<u32> {
        Ok(self.document(id)?.count(token))
    }

    /// Number of documents containing `token` at least once.
    pub fn document_frequency(&self, token: &str) -> usize {
        self.document_frequency.get(token).copied().unwrap_or(0)
    }

    /// TF-IDF weight of `token` in document `id`.
    pub fn tfidf(&self, token: &str, id: DocumentId) -> Result<f64> {
        let tf = self.term_frequency(token, id)?;
        if tf == 0 {
            return Ok(0.0);
        }
        Ok(tf as f64 * idf(self.document_frequency(token), self.documents.len()))
    }

    /// Distinct terms of document `id` in first-seen order.
    pub fn terms_of(&self, id: DocumentId) -> Result<impl Iterator<Item = &str>> {
        Ok(self.document(id)?.terms.iter().map(|t| t.term.as_str()))
    }

    /// Ids of all documents tagged with `category`, ascending.
    pub fn documents_with_category(&self, category: &str) -> Vec<DocumentId> {
        self.documents
            .iter()
            .filter(|d| d.category() == Some(category))
            .map(|d| d.id)
            .collect()
    }

    /// Distinct category tags in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.documents
            .iter()
            .filter_map(|d| d.category())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// (category, document count) pairs in first-seen category order.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        self.categories()
            .into_iter()
            .map(|c| (c.to_string(), self.documents_with_category(c).len()))
            .collect()
    }

    /// Number of distinct terms across the whole corpus.
    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    // --- Persistence ---

    /// Snapshot the corpus as a serializable record.
    pub fn to_persisted(&self) -> PersistedModel {
        PersistedModel {
            version: MODEL_FORMAT_VERSION,
            documents: self
                .documents
                .iter()
                .map(|d| PersistedDocument {
                    id: d.id,
                    category: d.category.clone(),
                    terms: d.terms.clone(),
                })
                .collect(),
            document_frequency: self
                .document_frequency
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        }
    }

    /// Rebuild a corpus from a persisted record, validating it on the way.
    ///
    /// Documents are re-inserted in id order, so ids and tags come back
    /// exactly as they were saved. The stored document-frequency table must
    /// agree with the one recomputed from the documents.
    pub fn from_persisted(record: PersistedModel) -> Result<Self> {
        if record.version != MODEL_FORMAT_VERSION {
            return Err(ClassifierError::CorruptModel(format!(
                "unsupported model format version {} (expected {})",
                record.version, MODEL_FORMAT_VERSION
            )));
        }

        let mut model = CorpusModel::new();

        for (expected, doc) in record.documents.into_iter().enumerate() {
            if doc.id.index() != expected {
                return Err(ClassifierError::CorruptModel(format!(
                    "document ids are not dense: found {} at position {expected}",
                    doc.id
                )));
            }
            if doc.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
                return Err(ClassifierError::CorruptModel(format!(
                    "document {} has a blank category",
                    doc.id
                )));
            }

            let mut lookup = HashMap::with_capacity(doc.terms.len());
            for (pos, term) in doc.terms.iter().enumerate() {
                if term.count == 0 {
                    return Err(ClassifierError::CorruptModel(format!(
                        "document {} has a zero count for '{}'",
                        doc.id, term.term
                    )));
                }
                if lookup.insert(term.term.clone(), pos).is_some() {
                    return Err(ClassifierError::CorruptModel(format!(
                        "document {} lists '{}' more than once",
                        doc.id, term.term
                    )));
                }
                *model.document_frequency.entry(term.term.clone()).or_insert(0) += 1;
            }

            model.documents.push(Document {
                id: doc.id,
                category: doc.category,
                terms: doc.terms,
                lookup,
            });
        }

        let stored: HashMap<String, usize> = record.document_frequency.into_iter().collect();
        if stored != model.document_frequency {
            return Err(ClassifierError::CorruptModel(
                "document frequency table does not match the stored documents".to_string(),
            ));
        }

        Ok(model)
    }
}

/// Serializable form of a CorpusModel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedModel {
    pub version: u32,
    pub documents: Vec<PersistedDocument>,
    /// Per-term document frequency (sorted for stable output).
    pub document_frequency: BTreeMap<String, usize>,
}

/// Serializable form of one Document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub terms: Vec<TermCount>,
}
