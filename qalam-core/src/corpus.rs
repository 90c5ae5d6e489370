//! Whole-corpus discovery, loading, and derived collections.

use crate::loader::PostLoader;
use crate::models::{Post, PostMetadata, Series, SeriesNavigation};
use crate::paths::file_path_to_slug;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use walkdir::WalkDir;

/// Default number of related posts returned by [`Corpus::related_posts`].
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Recursively discover content files under `root`.
///
/// Returns normalized relative paths (forward slashes) of every
/// `.md`/`.mdx` file, excluding any file named `readme.md`
/// (case-insensitive) at any depth. A missing root yields an empty
/// list, not an error. Output is sorted for determinism.
pub fn discover_content_files(root: &Path) -> Vec<String> {
    if !root.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            matches!(
                entry.path().extension().and_then(|e| e.to_str()),
                Some("md") | Some("mdx")
            )
        })
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.to_lowercase() != "readme.md")
                .unwrap_or(false)
        })
        .filter_map(|entry| {
            let rel = entry.path().strip_prefix(root).ok()?;
            Some(
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/"),
            )
        })
        .collect();

    files.sort();
    files
}

/// The in-memory collection of posts for one build.
///
/// Owns every [`Post`] record for the duration of the build; nothing
/// mutates it after construction.
#[derive(Debug, Clone)]
pub struct Corpus {
    posts: Vec<Post>,
}

impl Corpus {
    /// Discover and load every post under the loader's content root.
    ///
    /// Individual load failures are absorbed by the loader (logged,
    /// `None`), so a single bad file never aborts the corpus. Posts
    /// without a usable `date` value are dropped; the rest are sorted
    /// newest-first, with unparseable dates after all valid ones.
    pub fn load(loader: &PostLoader) -> Self {
        let files = discover_content_files(loader.content_dir());
        tracing::info!(count = files.len(), "Discovered content files");

        let mut posts: Vec<Post> = files
            .iter()
            .map(|file| file_path_to_slug(file))
            .filter_map(|slug| loader.load(&slug))
            .filter(|post| post.frontmatter.has_date())
            .collect();

        posts.sort_by(|a, b| {
            compare_dates_desc(a.frontmatter.parsed_date(), b.frontmatter.parsed_date())
        });

        tracing::info!(count = posts.len(), "Loaded corpus");

        Self { posts }
    }

    /// Build a corpus from already-loaded posts (test seam).
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        posts.retain(|post| post.frontmatter.has_date());
        posts.sort_by(|a, b| {
            compare_dates_desc(a.frontmatter.parsed_date(), b.frontmatter.parsed_date())
        });
        Self { posts }
    }

    /// All posts, date-descending.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Metadata projections of all posts, in corpus order.
    pub fn metadata(&self) -> Vec<PostMetadata> {
        self.posts.iter().map(Post::metadata).collect()
    }

    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn posts_by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.frontmatter.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn posts_by_category(&self, category: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.frontmatter.category.as_deref() == Some(category))
            .collect()
    }

    /// Posts of one series, in series order: ascending `seriesOrder`
    /// when both posts carry one, otherwise ascending date.
    pub fn posts_by_series(&self, series_slug: &str) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| p.series_slug.as_deref() == Some(series_slug))
            .collect();

        posts.sort_by(|a, b| compare_series_order(a, b));
        posts
    }

    /// All series, sorted by display name (case-insensitive).
    pub fn series(&self) -> Vec<Series> {
        let mut grouped: BTreeMap<String, Vec<&Post>> = BTreeMap::new();
        for post in &self.posts {
            if let Some(slug) = &post.series_slug {
                grouped.entry(slug.clone()).or_default().push(post);
            }
        }

        let mut series: Vec<Series> = grouped
            .into_iter()
            .map(|(slug, mut posts)| {
                posts.sort_by(|a, b| compare_series_order(a, b));
                let name = posts
                    .iter()
                    .find_map(|p| p.series.clone())
                    .unwrap_or_else(|| slug.clone());
                Series {
                    name,
                    slug,
                    description: None,
                    posts: posts.iter().map(|p| p.metadata()).collect(),
                }
            })
            .collect();

        series.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        series
    }

    /// Unique tags across the corpus, lexicographically sorted.
    pub fn tags(&self) -> Vec<String> {
        self.posts
            .iter()
            .flat_map(|p| p.frontmatter.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Unique categories across the corpus, lexicographically sorted.
    pub fn categories(&self) -> Vec<String> {
        self.posts
            .iter()
            .filter_map(|p| p.frontmatter.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Posts most similar to `slug` by shared-tag count.
    ///
    /// Zero-score posts are excluded; ties keep the corpus's
    /// date-descending order (the sort is stable).
    pub fn related_posts(&self, slug: &str, limit: usize) -> Vec<&Post> {
        let Some(current) = self.get(slug) else {
            return Vec::new();
        };
        if current.frontmatter.tags.is_empty() {
            return Vec::new();
        }

        let current_tags: BTreeSet<&str> = current
            .frontmatter
            .tags
            .iter()
            .map(String::as_str)
            .collect();

        let mut scored: Vec<(&Post, usize)> = self
            .posts
            .iter()
            .filter(|p| p.slug != slug)
            .map(|p| {
                let shared = p
                    .frontmatter
                    .tags
                    .iter()
                    .filter(|t| current_tags.contains(t.as_str()))
                    .count();
                (p, shared)
            })
            .filter(|(_, score)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().take(limit).map(|(p, _)| p).collect()
    }

    /// The neighbors of `slug` within its series' ordered post list.
    ///
    /// `None` at either boundary; both `None` when the post has no
    /// series or is not found.
    pub fn series_navigation(&self, slug: &str) -> SeriesNavigation {
        let Some(series_slug) = self.get(slug).and_then(|p| p.series_slug.as_deref()) else {
            return SeriesNavigation::default();
        };

        let ordered = self.posts_by_series(series_slug);
        let Some(index) = ordered.iter().position(|p| p.slug == slug) else {
            return SeriesNavigation::default();
        };

        SeriesNavigation {
            prev: index
                .checked_sub(1)
                .and_then(|i| ordered.get(i))
                .map(|p| p.metadata()),
            next: ordered.get(index + 1).map(|p| p.metadata()),
        }
    }
}

/// Date-descending; posts with unparseable dates sort after all posts
/// with valid dates; two unparseable dates compare equal.
fn compare_dates_desc(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Series Ordering Rule: both numeric `seriesOrder` → ascending by it;
/// otherwise ascending date.
fn compare_series_order(a: &Post, b: &Post) -> Ordering {
    match (a.frontmatter.series_order, b.frontmatter.series_order) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.frontmatter.parsed_date().cmp(&b.frontmatter.parsed_date()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadOptions, PostLoader};
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &TempDir, rel: &str, frontmatter: &str, body: &str) {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, format!("---\n{}\n---\n\n{}\n", frontmatter, body)).unwrap();
    }

    fn sample_corpus() -> (TempDir, Corpus) {
        let dir = TempDir::new().unwrap();

        write_post(
            &dir,
            "alpha.md",
            "title: Alpha\ndate: \"2025-03-01\"\ntags: [rust, wasm]\ncategory: programming",
            "Alpha body.",
        );
        write_post(
            &dir,
            "beta.md",
            "title: Beta\ndate: \"2025-01-15\"\ntags: [rust]\ncategory: programming",
            "Beta body.",
        );
        write_post(
            &dir,
            "gamma.md",
            "title: Gamma\ndate: \"2025-02-10\"\ntags: [wasm, rust]\ncategory: tooling",
            "Gamma body.",
        );
        write_post(
            &dir,
            "undated.md",
            "title: Undated\ntags: [rust]",
            "No date, dropped.",
        );
        write_post(
            &dir,
            "badly-dated.md",
            "title: Badly Dated\ndate: \"sometime\"",
            "Kept but sorts last.",
        );
        write_post(
            &dir,
            "react-course/01-intro.md",
            "title: Course Intro\ndate: \"2024-05-01\"\nseriesOrder: 1",
            "Intro.",
        );
        write_post(
            &dir,
            "react-course/02-state.md",
            "title: Course State\ndate: \"2024-04-01\"\nseriesOrder: 2",
            "State.",
        );
        write_post(
            &dir,
            "02-zoo/animals.md",
            "title: Animals\ndate: \"2024-06-01\"",
            "Zoo.",
        );
        fs::write(dir.path().join("README.md"), "not content").unwrap();
        fs::write(dir.path().join("notes.txt"), "not content").unwrap();

        let loader = PostLoader::new(dir.path(), LoadOptions::default());
        let corpus = Corpus::load(&loader);
        (dir, corpus)
    }

    #[test]
    fn test_discovery_filters_and_sorts() {
        let (dir, _) = sample_corpus();
        let files = discover_content_files(dir.path());

        assert!(files.contains(&"alpha.md".to_string()));
        assert!(files.contains(&"react-course/01-intro.md".to_string()));
        assert!(!files.iter().any(|f| f.to_lowercase().contains("readme")));
        assert!(!files.iter().any(|f| f.ends_with(".txt")));

        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_discovery_missing_root_is_empty() {
        assert!(discover_content_files(Path::new("/no/such/dir")).is_empty());
    }

    #[test]
    fn test_corpus_drops_undated_and_sorts_desc() {
        let (_dir, corpus) = sample_corpus();
        let slugs: Vec<&str> = corpus.posts().iter().map(|p| p.slug.as_str()).collect();

        assert!(!slugs.contains(&"undated"));
        // Newest first; the unparseable date lands at the end
        assert_eq!(
            slugs,
            vec![
                "alpha",
                "gamma",
                "beta",
                "02-zoo/animals",
                "react-course/01-intro",
                "react-course/02-state",
                "badly-dated",
            ]
        );
    }

    #[test]
    fn test_slug_round_trip() {
        let (_dir, corpus) = sample_corpus();
        for post in corpus.posts() {
            assert!(!post.slug.contains('\\'));
            assert!(!post.slug.ends_with(".md"));
        }
        assert_eq!(
            corpus.get("react-course/01-intro").unwrap().slug,
            "react-course/01-intro"
        );
    }

    #[test]
    fn test_tags_and_categories_sorted_unique() {
        let (_dir, corpus) = sample_corpus();
        assert_eq!(corpus.tags(), vec!["rust", "wasm"]);
        assert_eq!(corpus.categories(), vec!["programming", "tooling"]);
    }

    #[test]
    fn test_posts_by_tag_and_category() {
        let (_dir, corpus) = sample_corpus();
        assert_eq!(corpus.posts_by_tag("wasm").len(), 2);
        assert_eq!(corpus.posts_by_category("tooling").len(), 1);
        assert!(corpus.posts_by_tag("absent").is_empty());
    }

    #[test]
    fn test_series_ordering_by_series_order() {
        let (_dir, corpus) = sample_corpus();
        let ordered = corpus.posts_by_series("react-course");
        let slugs: Vec<&str> = ordered.iter().map(|p| p.slug.as_str()).collect();
        // seriesOrder wins over the (reversed) dates
        assert_eq!(slugs, vec!["react-course/01-intro", "react-course/02-state"]);
    }

    #[test]
    fn test_series_ordering_falls_back_to_date() {
        let dir = TempDir::new().unwrap();
        write_post(&dir, "s/a.md", "title: A\ndate: \"2025-02-01\"", "a");
        write_post(&dir, "s/b.md", "title: B\ndate: \"2025-01-01\"", "b");

        let loader = PostLoader::new(dir.path(), LoadOptions::default());
        let corpus = Corpus::load(&loader);
        let slugs: Vec<&str> = corpus
            .posts_by_series("s")
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["s/b", "s/a"]);
    }

    #[test]
    fn test_series_list_sorted_by_name() {
        let (_dir, corpus) = sample_corpus();
        let series = corpus.series();

        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["React Course", "Zoo"]);
        assert_eq!(series[1].slug, "02-zoo");
        assert_eq!(series[0].posts.len(), 2);
    }

    #[test]
    fn test_series_navigation() {
        let (_dir, corpus) = sample_corpus();

        let first = corpus.series_navigation("react-course/01-intro");
        assert!(first.prev.is_none());
        assert_eq!(
            first.next.as_ref().map(|p| p.slug.as_str()),
            Some("react-course/02-state")
        );

        let last = corpus.series_navigation("react-course/02-state");
        assert_eq!(
            last.prev.as_ref().map(|p| p.slug.as_str()),
            Some("react-course/01-intro")
        );
        assert!(last.next.is_none());
    }

    #[test]
    fn test_series_navigation_without_series() {
        let (_dir, corpus) = sample_corpus();
        let nav = corpus.series_navigation("alpha");
        assert!(nav.prev.is_none() && nav.next.is_none());

        let missing = corpus.series_navigation("no-such-slug");
        assert!(missing.prev.is_none() && missing.next.is_none());
    }

    #[test]
    fn test_related_posts_ranked_by_shared_tags() {
        let (_dir, corpus) = sample_corpus();
        // alpha: [rust, wasm]; gamma shares both, beta shares one
        let related = corpus.related_posts("alpha", DEFAULT_RELATED_LIMIT);
        let slugs: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["gamma", "beta"]);
    }

    #[test]
    fn test_related_posts_excludes_zero_score() {
        let (_dir, corpus) = sample_corpus();
        let related = corpus.related_posts("alpha", 10);
        assert!(!related.iter().any(|p| p.slug == "02-zoo/animals"));
        assert!(!related.iter().any(|p| p.slug == "alpha"));
    }

    #[test]
    fn test_related_posts_without_tags_is_empty() {
        let (_dir, corpus) = sample_corpus();
        assert!(corpus.related_posts("badly-dated", 3).is_empty());
        assert!(corpus.related_posts("missing", 3).is_empty());
    }
}
