use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use rubric::config::Config;
use rubric::db::ArticleStore;
use rubric::store::{JsonFileStore, ModelStore};
use rubric::text::tokenizer::StemmingTokenizer;
use rubric::{ClassifierError, ClassifierService};

/// Rubric: sort news articles into categories by nearest TF-IDF centroid.
///
/// Train each category from example texts, then classify new articles.
/// Classified articles are archived under the category they were assigned.
#[derive(Parser)]
#[command(name = "rubric", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the article archive
    Init,

    /// Add example documents to a category
    Train {
        /// Category key (e.g. sport)
        category: String,

        /// Text files to learn from, one document per file
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Classify an article and archive it under the winning category
    Classify {
        /// Article headline stored alongside the text
        #[arg(long, default_value = "")]
        header: String,

        /// Article text
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the article text from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,

        /// Only rank categories, don't archive the article
        #[arg(long)]
        dry_run: bool,
    },

    /// List archived articles in a category
    Articles {
        /// Category key (e.g. tech)
        category: String,
    },

    /// Show model and archive status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rubric=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing article archive...");
            #[cfg(feature = "sqlite")]
            {
                let db = rubric::db::initialize_sqlite(&config.db_path)?;
                println!("Article archive initialized at: {}", config.db_path);
                println!("Tables created: {}", db.table_count().await?);
            }
            #[cfg(not(feature = "sqlite"))]
            println!("Built without the `sqlite` feature; articles are kept in memory only.");

            println!("Model file: {}", config.model_path.display());
            println!("\nNext step: train each category, e.g.");
            println!("  rubric train {} articles/*.txt", config.categories[0].key);
        }

        Commands::Train { category, files } => {
            config.require_category(&category)?;
            let documents = read_documents(&files).await?;

            let service = open_service(&config).await?;
            let summary = service.train(&category, &documents).await?;
            service.close().await;

            rubric::output::terminal::display_train_summary(&summary, &config.categories);
        }

        Commands::Classify {
            header,
            text,
            file,
            json,
            dry_run,
        } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("Provide --text or --file"),
            };

            let service = open_service(&config).await?;
            let outcome = if dry_run {
                service.classify(&text).await.map(|ranking| (None, ranking))
            } else {
                service
                    .classify_article(&header, &text)
                    .await
                    .map(|c| (Some(c.article_id), c.ranking))
            };
            service.close().await;

            let (article_id, ranking) = match outcome {
                Ok(outcome) => outcome,
                Err(e) if e.needs_training() => {
                    println!("{} {e}", "Not ready:".yellow().bold());
                    if matches!(e, ClassifierError::NoTrainedModel) {
                        println!("Run `rubric train <category> <files...>` first.");
                    } else {
                        println!("Every configured category needs training documents.");
                    }
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else {
                rubric::output::terminal::display_ranking(&ranking, &config.categories);
                if let Some(id) = article_id {
                    println!("  Archived as article #{id}");
                }
            }
        }

        Commands::Articles { category } => {
            let category = config.require_category(&category)?.clone();
            let service = open_service(&config).await?;
            let articles = service.articles(&category.key).await?;
            service.close().await;

            rubric::output::terminal::display_articles(&articles, &category);
        }

        Commands::Status => {
            let store = JsonFileStore::new(&config.model_path);
            let articles = existing_article_store(&config);
            rubric::status::show(&store, articles.as_deref(), &config.categories).await?;
        }
    }

    Ok(())
}

/// Build the classifier service from configuration.
async fn open_service(config: &Config) -> Result<ClassifierService> {
    let store: Arc<dyn ModelStore> = Arc::new(JsonFileStore::new(&config.model_path));
    let tokenizer = StemmingTokenizer::new(config.language).keep_stop_words(config.keep_stop_words);

    let service = ClassifierService::open(
        store,
        open_article_store(config)?,
        Arc::new(tokenizer),
        config.categories.clone(),
    )
    .await?;
    Ok(service)
}

/// Open the article archive, creating it if needed.
fn open_article_store(config: &Config) -> Result<Arc<dyn ArticleStore>> {
    #[cfg(feature = "sqlite")]
    {
        let db: Arc<dyn ArticleStore> = rubric::db::initialize_sqlite(&config.db_path)?;
        Ok(db)
    }
    #[cfg(not(feature = "sqlite"))]
    {
        let _ = config;
        warn!("Built without the `sqlite` feature; archived articles will not persist");
        Ok(Arc::new(rubric::db::MemoryArticleStore::new()))
    }
}

/// Open the article archive only if it already exists (for status).
fn existing_article_store(config: &Config) -> Option<Arc<dyn ArticleStore>> {
    #[cfg(feature = "sqlite")]
    {
        match rubric::db::open_sqlite(&config.db_path) {
            Ok(db) => Some(db as Arc<dyn ArticleStore>),
            Err(e) => {
                warn!(error = %e, "Article archive unavailable");
                None
            }
        }
    }
    #[cfg(not(feature = "sqlite"))]
    {
        let _ = config;
        None
    }
}

/// Read every training file into memory, one buffer per file.
async fn read_documents(files: &[PathBuf]) -> Result<Vec<Vec<u8>>> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Reading documents...");

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read training file {}", path.display()))?;
        documents.push(bytes);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(documents)
}
