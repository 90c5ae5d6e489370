//! Frontmatter parsing from content files.

use crate::models::PostFrontmatter;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No frontmatter block found")]
    MissingFrontmatter,

    #[error("Missing required field: {0}")]
    MissingField(String),
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| Regex::new(r"(?s)^---\s*\n(.*?)\n---\s*\n?(.*)$").unwrap())
}

/// Split a raw file into its YAML frontmatter block and body text.
///
/// Returns `(frontmatter, body)`. There is no partial-recovery mode:
/// a missing block, malformed YAML, or a type mismatch (e.g. a
/// non-numeric `seriesOrder`) is an error for the caller to absorb.
///
/// # Example
///
/// ```
/// use qalam_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: My Post\ndate: \"2025-01-01\"\n---\n# Hello\n";
///
/// let (fm, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fm.title, "My Post");
/// assert_eq!(fm.date.as_deref(), Some("2025-01-01"));
/// assert!(body.trim().starts_with("# Hello"));
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(PostFrontmatter, String), FrontmatterError> {
    let captures = frontmatter_regex()
        .captures(content)
        .ok_or(FrontmatterError::MissingFrontmatter)?;

    let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    let frontmatter: PostFrontmatter = serde_yaml::from_str(yaml).map_err(|e| {
        if e.to_string().contains("missing field `title`") {
            FrontmatterError::MissingField("title".to_string())
        } else {
            FrontmatterError::Yaml(e)
        }
    })?;

    if frontmatter.title.trim().is_empty() {
        return Err(FrontmatterError::MissingField("title".to_string()));
    }

    Ok((frontmatter, body.to_string()))
}
