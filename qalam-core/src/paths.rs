//! Path normalization, slug derivation, and series inference.

use regex::Regex;
use std::sync::OnceLock;

/// Series membership inferred from a file's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesInfo {
    /// Human-readable display name derived from the folder name.
    pub name: String,

    /// The raw folder name, used as the series identifier.
    pub slug: String,
}

static NUMERIC_PREFIX: OnceLock<Regex> = OnceLock::new();

fn numeric_prefix() -> &'static Regex {
    NUMERIC_PREFIX.get_or_init(|| Regex::new(r"^\d+-").unwrap())
}

/// Normalize platform path separators to `/` so slugs are
/// platform-independent.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Convert a content-relative file path to its URL slug.
///
/// Strips a trailing `.md` or `.mdx` extension and nothing else.
/// A bare `.md` filename yields an empty slug; that is documented
/// behavior, not guarded against.
pub fn file_path_to_slug(file_path: &str) -> String {
    let normalized = normalize_path(file_path);
    normalized
        .strip_suffix(".mdx")
        .or_else(|| normalized.strip_suffix(".md"))
        .unwrap_or(&normalized)
        .to_string()
}

/// Infer series membership from a file's position in the tree.
///
/// Files in a subdirectory belong to a series named after the first
/// path segment: the display name strips a leading `digits-` prefix,
/// de-hyphenates, and title-cases (`01-web-development` →
/// `Web Development`); the slug keeps the raw folder name. Root-level
/// files have no series.
pub fn extract_series_info(file_path: &str) -> Option<SeriesInfo> {
    let normalized = normalize_path(file_path);
    let mut parts = normalized.split('/');

    let folder = parts.next()?;
    // Root-level file: single segment, nothing after the first split
    parts.next()?;

    Some(SeriesInfo {
        name: humanize_folder_name(folder),
        slug: folder.to_string(),
    })
}

fn humanize_folder_name(folder: &str) -> String {
    let stripped = numeric_prefix().replace(folder, "");
    stripped
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_to_slug() {
        assert_eq!(file_path_to_slug("hello.md"), "hello");
        assert_eq!(file_path_to_slug("folder/post.md"), "folder/post");
        assert_eq!(file_path_to_slug("page.mdx"), "page");
        assert_eq!(file_path_to_slug(".md"), "");
    }

    #[test]
    fn test_slug_preserves_inner_dots() {
        assert_eq!(file_path_to_slug("v1.2-notes.md"), "v1.2-notes");
        assert_eq!(file_path_to_slug("archive.md.bak"), "archive.md.bak");
    }

    #[test]
    fn test_backslash_normalization() {
        assert_eq!(file_path_to_slug(r"folder\post.md"), "folder/post");
        assert_eq!(normalize_path(r"a\b\c"), "a/b/c");
    }

    #[test]
    fn test_root_file_has_no_series() {
        assert_eq!(extract_series_info("post.md"), None);
    }

    #[test]
    fn test_series_from_folder() {
        assert_eq!(
            extract_series_info("react-course/01-intro.md"),
            Some(SeriesInfo {
                name: "React Course".into(),
                slug: "react-course".into(),
            })
        );
    }

    #[test]
    fn test_series_numeric_prefix_stripped_from_name_only() {
        assert_eq!(
            extract_series_info("01-web-development/post.md"),
            Some(SeriesInfo {
                name: "Web Development".into(),
                slug: "01-web-development".into(),
            })
        );
    }

    #[test]
    fn test_series_uses_first_segment_only() {
        assert_eq!(
            extract_series_info("rust-basics/extras/appendix.md"),
            Some(SeriesInfo {
                name: "Rust Basics".into(),
                slug: "rust-basics".into(),
            })
        );
    }
}
