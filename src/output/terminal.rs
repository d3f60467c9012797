// Colored terminal output for classification results and article listings.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::config::Category;
use crate::db::models::Article;
use crate::model::Ranking;
use crate::service::TrainSummary;

use super::truncate_chars;

fn label<'a>(categories: &'a [Category], key: &'a str) -> &'a str {
    categories
        .iter()
        .find(|c| c.key == key)
        .map(|c| c.label.as_str())
        .unwrap_or(key)
}

/// Display a ranked classification result, nearest category first.
pub fn display_ranking(ranking: &Ranking, categories: &[Category]) {
    println!("\n{}", "=== Classification Result ===".bold());
    println!();
    println!(
        "  {:>4}  {:<24} {:>10}",
        "Rank".dimmed(),
        "Category".dimmed(),
        "Distance".dimmed(),
    );
    println!("  {}", "-".repeat(42).dimmed());

    for (i, entry) in ranking.iter().enumerate() {
        let name = format!("{} ({})", label(categories, &entry.category), entry.category);
        let line = format!("  {:>4}. {:<24} {:>10.4}", i + 1, name, entry.distance);
        if i == 0 {
            println!("{}", line.green().bold());
        } else {
            println!("{line}");
        }
    }

    println!();
    println!(
        "  Assigned to: {}",
        label(categories, &ranking.winner().category).bold()
    );
}

/// Display the articles archived under one category.
pub fn display_articles(articles: &[Article], category: &Category) {
    if articles.is_empty() {
        println!(
            "No articles in {} yet. Run `rubric classify` to add some.",
            category.label
        );
        return;
    }

    println!(
        "\n{}",
        format!("=== {} ({} articles) ===", category.label, articles.len()).bold()
    );
    for article in articles {
        println!();
        println!(
            "  {} {}",
            format!("#{}", article.id).dimmed(),
            article.header.bold()
        );
        println!("     {}", truncate_chars(&article.text, 160));
        println!("     {}", article.created_at.dimmed());
    }
}

/// Display the outcome of a training batch.
pub fn display_train_summary(summary: &TrainSummary, categories: &[Category]) {
    println!(
        "{} Added {} documents ({} tokens) to {}",
        "✓".green(),
        summary.documents_added,
        summary.tokens_added,
        label(categories, &summary.category).bold()
    );
    println!("  Model now holds {} documents", summary.total_documents);
}
