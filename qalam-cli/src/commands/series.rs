//! Series command implementation.

use anyhow::Result;
use std::path::Path;

/// List every series with its ordered posts.
pub fn list_series(config_path: &Path, json: bool) -> Result<()> {
    let (_config, corpus) = super::load_corpus(config_path)?;
    let series = corpus.series();

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    if series.is_empty() {
        println!("No series found.");
        return Ok(());
    }

    for s in &series {
        println!("{} ({} posts)  [{}]", s.name, s.posts.len(), s.slug);
        for post in &s.posts {
            println!("  - {}  {}", post.slug, post.frontmatter.title);
        }
    }

    Ok(())
}
