// SqliteArticleStore — rusqlite backend implementing the ArticleStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::Article;
use super::traits::ArticleStore;

pub struct SqliteArticleStore {
    conn: Mutex<Connection>,
}

impl SqliteArticleStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }
}

#[async_trait]
impl ArticleStore for SqliteArticleStore {
    async fn insert_article(&self, header: &str, text: &str, category: &str) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_article(&conn, header, text, category)
    }

    async fn list_articles_by_category(&self, category: &str) -> Result<Vec<Article>> {
        let conn = self.conn.lock().await;
        super::queries::list_articles_by_category(&conn, category)
    }

    async fn article_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::article_count(&conn)
    }

    async fn category_counts(&self) -> Result<Vec<(String, i64)>> {
        let conn = self.conn.lock().await;
        super::queries::category_counts(&conn)
    }
}
