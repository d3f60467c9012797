// Article archive — where classified articles are stored for later listing.
//
// We use rusqlite with the "bundled" feature so there's no system SQLite
// dependency. The database file lives wherever RUBRIC_DB_PATH points
// (defaults to ./rubric.db). Without the `sqlite` feature, only the
// in-memory store is available.

pub mod memory;
pub mod models;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod queries;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryArticleStore;
pub use traits::ArticleStore;

#[cfg(feature = "sqlite")]
use anyhow::{Context, Result};
#[cfg(feature = "sqlite")]
use std::path::Path;
#[cfg(feature = "sqlite")]
use std::sync::Arc;

/// Open (or create) the SQLite article archive and run migrations.
#[cfg(feature = "sqlite")]
pub fn initialize_sqlite(db_path: &str) -> Result<Arc<sqlite::SqliteArticleStore>> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = rusqlite::Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    // WAL lets listing run while a classification is inserting
    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_tables(&conn)?;

    Ok(Arc::new(sqlite::SqliteArticleStore::new(conn)))
}

/// Open an existing SQLite article archive (fails if it doesn't exist yet).
#[cfg(feature = "sqlite")]
pub fn open_sqlite(db_path: &str) -> Result<Arc<sqlite::SqliteArticleStore>> {
    if !Path::new(db_path).exists() {
        anyhow::bail!(
            "Article database not found at {}. Run `rubric init` first.",
            db_path
        );
    }

    let conn = rusqlite::Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(Arc::new(sqlite::SqliteArticleStore::new(conn)))
}
