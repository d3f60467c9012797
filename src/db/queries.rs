// Database queries — every SQL statement the article archive runs.

use anyhow::Result;
use rusqlite::{params, Connection};

use super::models::Article;

/// Insert an article and return its row id.
pub fn insert_article(conn: &Connection, header: &str, text: &str, category: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO articles (header, text, category, created_at)
         VALUES (?1, ?2, ?3, datetime('now'))",
        params![header, text, category],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All articles in a category, oldest first.
pub fn list_articles_by_category(conn: &Connection, category: &str) -> Result<Vec<Article>> {
    let mut stmt = conn.prepare(
        "SELECT id, header, text, category, created_at
         FROM articles
         WHERE category = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![category], |row| {
        Ok(Article {
            id: row.get(0)?,
            header: row.get(1)?,
            text: row.get(2)?,
            category: row.get(3)?,
            created_at: row.get(4)?,
        })
    })?;

    let mut articles = Vec::new();
    for row in rows {
        articles.push(row?);
    }
    Ok(articles)
}

/// Total number of archived articles.
pub fn article_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
    Ok(count)
}

/// Article counts grouped by category.
pub fn category_counts(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT category, COUNT(*) FROM articles GROUP BY category ORDER BY category",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}
