//! CLI command implementations.

mod build;
mod init;
mod list;
mod post;
mod search;
mod series;
mod taxonomy;

pub use build::build_site;
pub use init::init_project;
pub use list::list_posts;
pub use post::show_post;
pub use search::search_posts;
pub use series::list_series;
pub use taxonomy::{list_categories, list_tags};

use anyhow::{Context, Result};
use qalam_core::{Config, Corpus, PostLoader};
use std::path::Path;

/// Load the config and the full corpus it points at.
pub(crate) fn load_corpus(config_path: &Path) -> Result<(Config, Corpus)> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let loader = PostLoader::new(config.content_dir(), config.load_options());
    let corpus = Corpus::load(&loader);
    Ok((config, corpus))
}
