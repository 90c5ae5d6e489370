//! # qalam-core
//!
//! Content-resolution pipeline for the qalam blog generator.
//!
//! This crate turns a directory of Markdown/MDX files into a fully
//! metadata-enriched collection of posts: slug resolution, series
//! inference, frontmatter parsing, excerpt/TOC/reading-time derivation,
//! tag and category indexing, related-post scoring, and series
//! sequencing. Rendering collaborators consume the resulting records.

pub mod config;
pub mod corpus;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod models;
pub mod paths;
pub mod search;
pub mod text;
pub mod toc;

pub use config::Config;
pub use corpus::{discover_content_files, Corpus};
pub use frontmatter::parse_frontmatter;
pub use loader::{LoadOptions, PostLoader};
pub use models::{Post, PostFrontmatter, PostMetadata, Series, SeriesNavigation, TocItem};
pub use search::{build_search_index, SearchEntry, SearchIndex};
pub use toc::extract_table_of_contents;
