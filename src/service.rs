// Classifier service — owns the model handle and the single-writer discipline.
//
// Every classification reads the durable model at the start and scores a
// private extended copy of it, so readers never block each other, never see a
// half-applied batch and always see what another process last persisted.
// Training takes the writer lock, re-reads the durable model, applies the
// whole batch, persists once and only then swaps the in-memory snapshot. Two
// concurrent trains through one service therefore serialize instead of
// overwriting each other.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::Category;
use crate::db::models::Article;
use crate::db::ArticleStore;
use crate::error::{ClassifierError, Result};
use crate::model::classifier::{classify_tokens, Ranking};
use crate::model::CorpusModel;
use crate::store::ModelStore;
use crate::text::traits::Tokenizer;

enum State {
    Open(Option<Arc<CorpusModel>>),
    Closed,
}

/// Outcome of a training batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainSummary {
    pub category: String,
    pub documents_added: usize,
    pub tokens_added: usize,
    pub total_documents: usize,
}

/// Outcome of classifying and archiving an article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleClassification {
    pub article_id: i64,
    pub ranking: Ranking,
}

pub struct ClassifierService {
    store: Arc<dyn ModelStore>,
    articles: Arc<dyn ArticleStore>,
    tokenizer: Arc<dyn Tokenizer>,
    categories: Vec<Category>,
    state: RwLock<State>,
    writer: Mutex<()>,
}

impl ClassifierService {
    /// Open the service and load whatever model the store currently holds.
    pub async fn open(
        store: Arc<dyn ModelStore>,
        articles: Arc<dyn ArticleStore>,
        tokenizer: Arc<dyn Tokenizer>,
        categories: Vec<Category>,
    ) -> Result<Self> {
        if categories.is_empty() {
            return Err(ClassifierError::InvalidInput(
                "at least one category is required".to_string(),
            ));
        }

        let model = store.load().await?.map(Arc::new);
        info!(
            store = %store.describe(),
            documents = model.as_ref().map(|m| m.document_count()).unwrap_or(0),
            categories = categories.len(),
            "Classifier service opened"
        );

        Ok(Self {
            store,
            articles,
            tokenizer,
            categories,
            state: RwLock::new(State::Open(model)),
            writer: Mutex::new(()),
        })
    }

    /// Re-read the durable model, replacing the in-memory snapshot.
    pub async fn reload_from_store(&self) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.ensure_open().await?;

        let model = self.store.load().await?.map(Arc::new);
        debug!(
            documents = model.as_ref().map(|m| m.document_count()).unwrap_or(0),
            "Reloaded corpus model"
        );
        *self.state.write().await = State::Open(model);
        Ok(())
    }

    /// Close the service. Waits for an in-flight training batch to finish;
    /// every call afterwards fails with `ServiceClosed`.
    pub async fn close(&self) {
        let _writer = self.writer.lock().await;
        *self.state.write().await = State::Closed;
        info!("Classifier service closed");
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The model as of the last open, reload or training batch.
    pub async fn model(&self) -> Result<Option<Arc<CorpusModel>>> {
        match &*self.state.read().await {
            State::Open(model) => Ok(model.clone()),
            State::Closed => Err(ClassifierError::ServiceClosed),
        }
    }

    /// Rank every configured category by distance to `text`.
    ///
    /// The durable model is re-read first; `NoTrainedModel` means the store
    /// holds nothing yet.
    pub async fn classify(&self, text: &str) -> Result<Ranking> {
        self.ensure_open().await?;
        let model = self
            .store
            .load()
            .await?
            .ok_or(ClassifierError::NoTrainedModel)?;

        let tokens = self.tokenizer.tokenize(text);
        let keys: Vec<&str> = self.categories.iter().map(|c| c.key.as_str()).collect();
        let ranking = classify_tokens(&model, &tokens, &keys)?;

        info!(
            tokens = tokens.len(),
            winner = %ranking.winner().category,
            distance = ranking.winner().distance,
            "Classified text"
        );
        Ok(ranking)
    }

    /// Classify an article and archive it under the winning category.
    pub async fn classify_article(&self, header: &str, text: &str) -> Result<ArticleClassification> {
        let ranking = self.classify(text).await?;
        let winner = ranking.winner().category.clone();
        let article_id = self.articles.insert_article(header, text, &winner).await?;

        info!(article_id, category = %winner, "Archived classified article");
        Ok(ArticleClassification {
            article_id,
            ranking,
        })
    }

    /// Add a batch of raw documents to `category` and persist the model once.
    ///
    /// Every buffer is tokenized before the model is touched; a single
    /// failure rejects the whole batch and nothing is written.
    pub async fn train<B: AsRef<[u8]>>(&self, category: &str, documents: &[B]) -> Result<TrainSummary> {
        if !self.categories.iter().any(|c| c.key == category) {
            return Err(ClassifierError::InvalidInput(format!(
                "unknown category '{category}'"
            )));
        }
        if documents.is_empty() {
            return Err(ClassifierError::InvalidInput(
                "training batch contains no documents".to_string(),
            ));
        }

        let mut batch = Vec::with_capacity(documents.len());
        for (i, doc) in documents.iter().enumerate() {
            let tokens = self.tokenizer.tokenize_bytes(doc.as_ref()).map_err(|e| {
                warn!(document = i, error = %e, "Rejecting training batch");
                e
            })?;
            if tokens.is_empty() {
                warn!(document = i, category, "Training document produced no tokens");
            }
            batch.push(tokens);
        }

        let _writer = self.writer.lock().await;
        self.ensure_open().await?;

        let mut model = self.store.load().await?.unwrap_or_default();
        for tokens in &batch {
            model.add_document(tokens, Some(category));
        }
        self.store.save(&model).await?;

        let summary = TrainSummary {
            category: category.to_string(),
            documents_added: batch.len(),
            tokens_added: batch.iter().map(Vec::len).sum(),
            total_documents: model.document_count(),
        };
        *self.state.write().await = State::Open(Some(Arc::new(model)));

        info!(
            category,
            added = summary.documents_added,
            total = summary.total_documents,
            "Training batch persisted"
        );
        Ok(summary)
    }

    /// Read-only pass-through to the article archive.
    pub async fn articles(&self, category: &str) -> Result<Vec<Article>> {
        self.ensure_open().await?;
        Ok(self.articles.list_articles_by_category(category).await?)
    }

    async fn ensure_open(&self) -> Result<()> {
        match &*self.state.read().await {
            State::Open(_) => Ok(()),
            State::Closed => Err(ClassifierError::ServiceClosed),
        }
    }
}
