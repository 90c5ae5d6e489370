//! Search command implementation.

use anyhow::{Context, Result};
use qalam_core::{build_search_index, Config, SearchIndex};
use std::fs;
use std::path::Path;

/// Search post metadata by title, tags, description, and category.
///
/// Uses the emitted `search.json` when a build exists, falling back to
/// an in-memory corpus load.
pub fn search_posts(config_path: &Path, query: &str, limit: usize, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    let index_path = config.output_dir().join("search.json");
    let index: SearchIndex = if index_path.is_file() {
        let raw = fs::read_to_string(&index_path).context("Failed to read search index")?;
        serde_json::from_str(&raw).context("Failed to parse search index")?
    } else {
        tracing::debug!("No search.json found; building index in memory");
        let (_config, corpus) = super::load_corpus(config_path)?;
        build_search_index(&corpus.metadata())
    };

    let results = index.search(query, limit);

    if json {
        let payload: Vec<_> = results
            .iter()
            .map(|(entry, score)| {
                serde_json::json!({
                    "slug": entry.slug,
                    "title": entry.title,
                    "excerpt": entry.excerpt,
                    "tags": entry.tags,
                    "category": entry.category,
                    "score": score,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }

    println!("\nFound {} results for '{}':\n", results.len(), query);
    for (entry, _score) in &results {
        println!("  {}  -  {}", entry.slug, entry.title);
        if !entry.excerpt.is_empty() {
            println!("    {}", entry.excerpt);
        }
    }

    Ok(())
}
