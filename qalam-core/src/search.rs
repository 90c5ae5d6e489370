//! Weighted search entries built from post metadata.
//!
//! The pipeline's sole obligation to search is producing metadata;
//! this module keeps the index a thin scoring wrapper over it so a
//! client-side fuzzy widget (or the CLI) can consume the same fields:
//! title, description, tags, and category, weighted in that spirit.

use crate::models::PostMetadata;
use serde::{Deserialize, Serialize};

const TITLE_WEIGHT: u32 = 3;
const TAG_WEIGHT: u32 = 2;
const DESCRIPTION_WEIGHT: u32 = 1;
const CATEGORY_WEIGHT: u32 = 1;

/// One searchable record, flattened from [`PostMetadata`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEntry {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub excerpt: String,
}

/// Searchable view over the aggregator's metadata output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIndex {
    pub entries: Vec<SearchEntry>,
}

/// Flatten post metadata into search entries.
pub fn build_search_index(posts: &[PostMetadata]) -> SearchIndex {
    let entries = posts
        .iter()
        .map(|post| SearchEntry {
            slug: post.slug.clone(),
            title: post.frontmatter.title.clone(),
            description: post.frontmatter.description.clone().unwrap_or_default(),
            tags: post.frontmatter.tags.clone(),
            category: post.frontmatter.category.clone().unwrap_or_default(),
            excerpt: post.excerpt.clone(),
        })
        .collect();

    SearchIndex { entries }
}

impl SearchIndex {
    /// Score entries against `query`, best first, zero scores dropped.
    ///
    /// Ties keep index order, which mirrors the corpus's
    /// date-descending order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<(&SearchEntry, u32)> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<(&SearchEntry, u32)> = self
            .entries
            .iter()
            .map(|entry| (entry, score_entry(entry, &needle)))
            .filter(|(_, score)| *score > 0)
            .collect();

        results.sort_by(|a, b| b.1.cmp(&a.1));
        results.truncate(limit);
        results
    }
}

fn score_entry(entry: &SearchEntry, needle: &str) -> u32 {
    let mut score = 0;

    if entry.title.to_lowercase().contains(needle) {
        score += TITLE_WEIGHT;
    }
    if entry
        .tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(needle))
    {
        score += TAG_WEIGHT;
    }
    if entry.description.to_lowercase().contains(needle) {
        score += DESCRIPTION_WEIGHT;
    }
    if entry.category.to_lowercase().contains(needle) {
        score += CATEGORY_WEIGHT;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostFrontmatter;

    fn meta(slug: &str, title: &str, tags: &[&str], category: &str) -> PostMetadata {
        PostMetadata {
            slug: slug.into(),
            frontmatter: PostFrontmatter {
                title: title.into(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                category: Some(category.into()),
                description: Some(format!("About {}", title)),
                ..Default::default()
            },
            excerpt: String::new(),
            reading_time: 1,
            series: None,
            series_slug: None,
        }
    }

    fn index() -> SearchIndex {
        build_search_index(&[
            meta("rust-intro", "Rust Introduction", &["rust"], "programming"),
            meta("wasm-notes", "WebAssembly Notes", &["rust", "wasm"], "tooling"),
            meta("cooking", "Sourdough", &["food"], "kitchen"),
        ])
    }

    #[test]
    fn test_title_match_outranks_tag_match() {
        let index = index();
        let results = index.search("rust", 10);

        assert_eq!(results.len(), 2);
        // "Rust Introduction" matches title + tag + description
        assert_eq!(results[0].0.slug, "rust-intro");
        assert_eq!(results[1].0.slug, "wasm-notes");
        assert!(results[0].1 > results[1].1);
    }

    #[test]
    fn test_zero_scores_excluded() {
        let index = index();
        let results = index.search("quantum", 10);
        assert!(results.is_empty());
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let index = index();
        assert_eq!(index.search("SOURDOUGH", 10).len(), 1);
    }

    #[test]
    fn test_limit_respected() {
        let index = index();
        assert_eq!(index.search("rust", 1).len(), 1);
    }

    #[test]
    fn test_empty_query_is_empty() {
        let index = index();
        assert!(index.search("   ", 10).is_empty());
    }
}
