//! Post command implementation.

use crate::PostFormat;
use anyhow::{Context, Result};
use qalam_core::{Config, PostLoader};
use std::path::Path;

/// Fetch a single post by slug.
///
/// Includes series navigation and related posts in the JSON form so
/// agents get the full resolved view in one call.
pub fn show_post(config_path: &Path, slug: &str, format: PostFormat) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let loader = PostLoader::new(config.content_dir(), config.load_options());

    let Some(post) = loader.load(slug) else {
        eprintln!("Post not found: {}", slug);
        std::process::exit(1);
    };

    match format {
        PostFormat::Json => {
            let (_config, corpus) = super::load_corpus(config_path)?;
            let nav = corpus.series_navigation(&post.slug);
            let related: Vec<_> = corpus
                .related_posts(&post.slug, config.related_limit)
                .iter()
                .map(|p| p.metadata())
                .collect();

            let payload = serde_json::json!({
                "post": post,
                "navigation": nav,
                "related": related,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        PostFormat::Html => {
            println!("{}", post.content);
        }
        PostFormat::Meta => {
            println!("{}", serde_json::to_string_pretty(&post.metadata())?);
        }
    }

    Ok(())
}
