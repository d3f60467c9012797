use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::text::tokenizer::Language;

/// Default category set: the two categories the article site was built around.
pub const DEFAULT_CATEGORIES: &str = "sport:Спорт,tech:Технологии";

/// A classification category: the key stored on documents and articles,
/// plus a label for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: String,
    pub label: String,
}

impl Category {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Parse a category list like `sport:Спорт,tech:Технологии`.
///
/// The label is optional (`sport,tech` uses the keys as labels). Order is
/// preserved and is the tie-break order for equal distances.
pub fn parse_categories(spec: &str) -> Result<Vec<Category>> {
    let mut categories: Vec<Category> = Vec::new();

    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (key, label) = match entry.split_once(':') {
            Some((key, label)) => (key.trim(), label.trim()),
            None => (entry, entry),
        };
        if key.is_empty() {
            anyhow::bail!("Category entry '{entry}' has an empty key");
        }
        if categories.iter().any(|c| c.key == key) {
            anyhow::bail!("Category '{key}' is listed more than once");
        }
        let label = if label.is_empty() { key } else { label };
        categories.push(Category::new(key, label));
    }

    if categories.is_empty() {
        anyhow::bail!("At least one category must be configured");
    }
    Ok(categories)
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Where the trained corpus model is stored
    pub model_path: PathBuf,
    /// SQLite file for the classified article archive
    pub db_path: String,
    /// Stemming language for the tokenizer
    pub language: Language,
    /// Keep stop words instead of dropping them
    pub keep_stop_words: bool,
    /// Ordered category set used for classification
    pub categories: Vec<Category>,
}

impl Config {
    /// Load configuration from environment variables. Everything has a default.
    pub fn load() -> Result<Self> {
        let language = match env::var("RUBRIC_LANGUAGE") {
            Ok(value) => value.parse::<Language>().map_err(anyhow::Error::msg)?,
            Err(_) => Language::default(),
        };

        let keep_stop_words = matches!(
            env::var("RUBRIC_KEEP_STOP_WORDS").as_deref(),
            Ok("1") | Ok("true") | Ok("yes")
        );

        let categories_spec =
            env::var("RUBRIC_CATEGORIES").unwrap_or_else(|_| DEFAULT_CATEGORIES.to_string());
        let categories =
            parse_categories(&categories_spec).context("Invalid RUBRIC_CATEGORIES")?;

        Ok(Self {
            model_path: env::var("RUBRIC_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./classifier.json")),
            db_path: env::var("RUBRIC_DB_PATH").unwrap_or_else(|_| "./rubric.db".to_string()),
            language,
            keep_stop_words,
            categories,
        })
    }

    /// Look up a configured category by key.
    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Check that `key` is one of the configured categories.
    /// Call this before training so typos don't create a stray category.
    pub fn require_category(&self, key: &str) -> Result<&Category> {
        self.category(key).ok_or_else(|| {
            let known: Vec<&str> = self.categories.iter().map(|c| c.key.as_str()).collect();
            anyhow::anyhow!(
                "Unknown category '{key}'. Configured categories: {}\n\
                 Set RUBRIC_CATEGORIES in your .env file to change them.",
                known.join(", ")
            )
        })
    }
}
