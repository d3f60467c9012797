// System status display — model size, per-category training counts, archive stats.

use anyhow::Result;

use crate::config::Category;
use crate::db::ArticleStore;
use crate::store::ModelStore;

/// Display system status to the terminal.
pub async fn show(
    store: &dyn ModelStore,
    articles: Option<&dyn ArticleStore>,
    categories: &[Category],
) -> Result<()> {
    match store.load().await? {
        None => {
            println!("Model: not trained yet ({})", store.describe());
            println!("  Run `rubric train <category> <files...>` to build it");
        }
        Some(model) => {
            println!(
                "Model: {} documents, {} distinct terms ({})",
                model.document_count(),
                model.vocabulary_size(),
                store.describe()
            );
            for category in categories {
                let count = model.documents_with_category(&category.key).len();
                if count == 0 {
                    println!("  {:<16} untrained", category.label);
                } else {
                    println!("  {:<16} {} documents", category.label, count);
                }
            }
            for (key, count) in model.category_counts() {
                if !categories.iter().any(|c| c.key == key) {
                    println!("  {:<16} {} documents (not configured)", key, count);
                }
            }
        }
    }

    match articles {
        None => println!("Articles: archive not initialized"),
        Some(db) => {
            println!("Articles: {} archived", db.article_count().await?);
            for (key, count) in db.category_counts().await? {
                println!("  {:<16} {}", key, count);
            }
        }
    }

    Ok(())
}
