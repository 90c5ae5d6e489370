//! Tag and category listing commands.

use anyhow::Result;
use std::path::Path;

/// List the unique, sorted tags across the corpus.
pub fn list_tags(config_path: &Path, json: bool) -> Result<()> {
    let (_config, corpus) = super::load_corpus(config_path)?;
    print_flat(&corpus.tags(), "tags", json)
}

/// List the unique, sorted categories across the corpus.
pub fn list_categories(config_path: &Path, json: bool) -> Result<()> {
    let (_config, corpus) = super::load_corpus(config_path)?;
    print_flat(&corpus.categories(), "categories", json)
}

fn print_flat(values: &[String], label: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(values)?);
        return Ok(());
    }

    if values.is_empty() {
        println!("No {} found.", label);
        return Ok(());
    }

    for value in values {
        println!("{}", value);
    }

    Ok(())
}
