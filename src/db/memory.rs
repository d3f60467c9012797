// MemoryArticleStore — a Vec behind a mutex.
//
// Used when the crate is built without the `sqlite` feature and in tests
// that only care about what the classifier archived.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::models::Article;
use super::traits::ArticleStore;

#[derive(Default)]
pub struct MemoryArticleStore {
    articles: Mutex<Vec<Article>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn insert_article(&self, header: &str, text: &str, category: &str) -> Result<i64> {
        let mut articles = self.articles.lock().await;
        let id = articles.len() as i64 + 1;
        articles.push(Article {
            id,
            header: header.to_string(),
            text: text.to_string(),
            category: category.to_string(),
            created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        Ok(id)
    }

    async fn list_articles_by_category(&self, category: &str) -> Result<Vec<Article>> {
        let articles = self.articles.lock().await;
        Ok(articles
            .iter()
            .filter(|a| a.category == category)
            .cloned()
            .collect())
    }

    async fn article_count(&self) -> Result<i64> {
        Ok(self.articles.lock().await.len() as i64)
    }

    async fn category_counts(&self) -> Result<Vec<(String, i64)>> {
        let articles = self.articles.lock().await;
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for article in articles.iter() {
            *counts.entry(article.category.clone()).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }
}
