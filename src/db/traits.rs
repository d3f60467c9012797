// Article store trait — backend-agnostic async interface to the article archive.
//
// Implementors: SqliteArticleStore (wraps rusqlite), MemoryArticleStore.
// The classifier only ever writes through this trait; listing is a read-only
// pass-through for whatever front end sits on top.

use anyhow::Result;
use async_trait::async_trait;

use super::models::Article;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Archive an article under `category` and return its id.
    async fn insert_article(&self, header: &str, text: &str, category: &str) -> Result<i64>;

    /// All articles in `category`, in insertion order.
    async fn list_articles_by_category(&self, category: &str) -> Result<Vec<Article>>;

    /// Total number of archived articles.
    async fn article_count(&self) -> Result<i64>;

    /// (category, article count) pairs, ordered by category name.
    async fn category_counts(&self) -> Result<Vec<(String, i64)>>;
}
