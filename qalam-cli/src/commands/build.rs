//! Build command implementation.

use anyhow::{Context, Result};
use qalam_core::{build_search_index, Config, Corpus};
use std::fs;
use std::path::Path;

/// Build the content artifacts consumed by rendering collaborators:
/// `posts.json`, `series.json`, `search.json`, and per-post HTML
/// fragments under `fragments/`.
pub fn build_site(config_path: &Path) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let (config, corpus) = super::load_corpus(config_path)?;

    tracing::info!("Building site: {}", config.site.title);

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let metadata = corpus.metadata();

    let posts_json =
        serde_json::to_string_pretty(&metadata).context("Failed to serialize posts")?;
    fs::write(output_dir.join("posts.json"), posts_json).context("Failed to write posts.json")?;

    let series_json =
        serde_json::to_string_pretty(&corpus.series()).context("Failed to serialize series")?;
    fs::write(output_dir.join("series.json"), series_json)
        .context("Failed to write series.json")?;

    let index = build_search_index(&metadata);
    let search_json =
        serde_json::to_string_pretty(&index).context("Failed to serialize search index")?;
    fs::write(output_dir.join("search.json"), search_json)
        .context("Failed to write search.json")?;

    let fragments = write_fragments(&config, &corpus)?;

    tracing::info!("✓ Built {} posts, {} fragments", corpus.posts().len(), fragments);
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok(())
}

/// Write each post's bare content fragment for embedding.
///
/// `only_slug` restricts emission to one post; MDX posts are skipped
/// since their raw source is rendered downstream.
fn write_fragments(config: &Config, corpus: &Corpus) -> Result<usize> {
    let fragments_dir = config.output_dir().join("fragments");
    let mut written = 0;

    for post in corpus.posts() {
        if let Some(only) = &config.only_slug {
            if &post.slug != only {
                continue;
            }
        }
        if post.is_mdx {
            tracing::debug!(slug = %post.slug, "Skipping MDX fragment");
            continue;
        }

        let target = fragments_dir.join(format!("{}.html", post.slug));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(&target, &post.content)
            .with_context(|| format!("Failed to write {:?}", target))?;
        written += 1;
    }

    Ok(written)
}
