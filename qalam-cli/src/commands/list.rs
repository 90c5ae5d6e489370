//! List command implementation.

use anyhow::Result;
use std::path::Path;

/// List every post in the corpus, newest first.
pub fn list_posts(config_path: &Path, json: bool) -> Result<()> {
    let (_config, corpus) = super::load_corpus(config_path)?;
    let metadata = corpus.metadata();

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    if metadata.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    for post in &metadata {
        let date = post.frontmatter.date.as_deref().unwrap_or("----------");
        let series = post
            .series
            .as_deref()
            .map(|s| format!("  [{}]", s))
            .unwrap_or_default();
        println!(
            "{}  {:<40} {} min{}",
            date, post.slug, post.reading_time, series
        );
    }
    println!("\n{} posts", metadata.len());

    Ok(())
}
