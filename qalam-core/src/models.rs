//! Content model structs for posts, series, and navigation.

use crate::text::is_arabic_text;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Author-supplied metadata from a post's frontmatter block.
///
/// Unrecognized keys are preserved in `extra` but never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PostFrontmatter {
    pub title: String,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub series: Option<String>,

    #[serde(rename = "seriesOrder")]
    #[serde(default)]
    pub series_order: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PostFrontmatter {
    /// Whether the post declares or exhibits right-to-left content.
    ///
    /// An explicit `language: ar` (or `arabic`) wins; otherwise the
    /// title text is classified by Arabic character ratio.
    pub fn is_rtl(&self) -> bool {
        match self.language.as_deref() {
            Some("ar") | Some("arabic") => true,
            Some(_) => false,
            None => is_arabic_text(&self.title),
        }
    }

    /// Whether the frontmatter carries a usable date string.
    ///
    /// The string may still fail to parse; such posts sort after all
    /// posts with valid dates.
    pub fn has_date(&self) -> bool {
        self.date.as_deref().is_some_and(|d| !d.trim().is_empty())
    }

    /// Parse the date string, accepting `YYYY-MM-DD` or an ISO datetime.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            })
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }
}

/// One heading anchor in a post's table of contents.
///
/// `id` is unique within the post; `level` (1-6) is used only for
/// relative indentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// A single content file's fully resolved state.
///
/// Constructed fresh on every corpus read and never mutated afterwards.
/// `slug` is derived solely from the file path (extension stripped,
/// separators normalized to `/`) and is unique across the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,

    pub frontmatter: PostFrontmatter,

    /// Rendered HTML for `.md` files; raw source for `.mdx` files,
    /// which are rendered downstream.
    pub content: String,

    /// True when `content` is raw MDX source rather than HTML.
    pub is_mdx: bool,

    pub excerpt: String,

    /// Whole minutes; 0 only for zero-word content.
    pub reading_time: u32,

    pub table_of_contents: Vec<TocItem>,

    /// Series display name (frontmatter override wins over the
    /// folder-derived name).
    #[serde(default)]
    pub series: Option<String>,

    /// Series identifier, always the raw containing folder name.
    #[serde(default)]
    pub series_slug: Option<String>,
}

impl Post {
    pub fn is_rtl(&self) -> bool {
        self.frontmatter.is_rtl()
    }

    /// Lightweight projection for listing/search/navigation contexts.
    pub fn metadata(&self) -> PostMetadata {
        PostMetadata {
            slug: self.slug.clone(),
            frontmatter: self.frontmatter.clone(),
            excerpt: self.excerpt.clone(),
            reading_time: self.reading_time,
            series: self.series.clone(),
            series_slug: self.series_slug.clone(),
        }
    }
}

/// Projection of [`Post`] without the rendered content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub slug: String,
    pub frontmatter: PostFrontmatter,
    pub excerpt: String,
    pub reading_time: u32,

    #[serde(default)]
    pub series: Option<String>,

    #[serde(default)]
    pub series_slug: Option<String>,
}

/// An ordered group of posts forming a multi-part sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Human-readable label: frontmatter override or the de-hyphenated,
    /// title-cased folder name.
    pub name: String,

    /// Slug of the containing directory.
    pub slug: String,

    #[serde(default)]
    pub description: Option<String>,

    pub posts: Vec<PostMetadata>,
}

/// Neighbors of a post within its series' ordered post list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeriesNavigation {
    pub prev: Option<PostMetadata>,
    pub next: Option<PostMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontmatter(date: Option<&str>) -> PostFrontmatter {
        PostFrontmatter {
            title: "Test".into(),
            date: date.map(|d| d.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parsed_date_formats() {
        assert_eq!(
            frontmatter(Some("2025-03-14")).parsed_date(),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
        assert_eq!(
            frontmatter(Some("2025-03-14T08:30:00")).parsed_date(),
            NaiveDate::from_ymd_opt(2025, 3, 14)
        );
        assert_eq!(frontmatter(Some("not a date")).parsed_date(), None);
        assert_eq!(frontmatter(None).parsed_date(), None);
    }

    #[test]
    fn test_has_date() {
        assert!(frontmatter(Some("2025-01-01")).has_date());
        assert!(frontmatter(Some("garbage")).has_date());
        assert!(!frontmatter(Some("   ")).has_date());
        assert!(!frontmatter(None).has_date());
    }

    #[test]
    fn test_is_rtl_from_language() {
        let mut fm = frontmatter(None);
        fm.language = Some("ar".into());
        assert!(fm.is_rtl());

        fm.language = Some("arabic".into());
        assert!(fm.is_rtl());

        fm.language = Some("en".into());
        fm.title = "مرحبا بكم".into();
        assert!(!fm.is_rtl(), "explicit language wins over detection");
    }

    #[test]
    fn test_is_rtl_from_title() {
        let mut fm = frontmatter(None);
        fm.title = "مرحبا بكم في مدونتي".into();
        assert!(fm.is_rtl());

        fm.title = "Welcome to my blog".into();
        assert!(!fm.is_rtl());
    }

    #[test]
    fn test_metadata_projection() {
        let post = Post {
            slug: "folder/post".into(),
            frontmatter: frontmatter(Some("2025-01-01")),
            content: "<p>body</p>".into(),
            is_mdx: false,
            excerpt: "body".into(),
            reading_time: 1,
            table_of_contents: vec![],
            series: Some("Folder".into()),
            series_slug: Some("folder".into()),
        };

        let meta = post.metadata();
        assert_eq!(meta.slug, "folder/post");
        assert_eq!(meta.excerpt, "body");
        assert_eq!(meta.series_slug.as_deref(), Some("folder"));
    }
}
