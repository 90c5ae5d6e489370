//! Loading a single content file into a fully populated [`Post`].

use crate::frontmatter::{parse_frontmatter, FrontmatterError};
use crate::markdown::MarkdownProcessor;
use crate::models::Post;
use crate::paths::extract_series_info;
use crate::text::{generate_excerpt, reading_time_minutes, DEFAULT_EXCERPT_CHARS};
use crate::toc::extract_table_of_contents;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Explicit per-build options, passed in at construction rather than
/// read from ambient process state.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Production builds suppress posts flagged `draft: true`.
    pub production: bool,

    /// Character budget for generated excerpts.
    pub excerpt_chars: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            production: false,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

/// Reads one content file and merges frontmatter with derived fields.
pub struct PostLoader {
    content_dir: PathBuf,
    options: LoadOptions,
    processor: MarkdownProcessor,
}

impl PostLoader {
    pub fn new(content_dir: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            content_dir: content_dir.into(),
            options,
            processor: MarkdownProcessor::new(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Load the post backing `slug`.
    ///
    /// Returns `None` when no `<slug>.md`/`<slug>.mdx` file exists,
    /// when the post is a suppressed draft, or when reading/parsing
    /// fails — failures are logged with the offending slug and
    /// degraded to absence, never propagated.
    pub fn load(&self, slug: &str) -> Option<Post> {
        // Accept URL-encoded or Windows separators in requested slugs
        let slug = slug.replace("%5C", "/").replace('\\', "/");

        match self.try_load(&slug) {
            Ok(post) => post,
            Err(e) => {
                tracing::error!(slug = %slug, error = %e, "Failed to load post");
                None
            }
        }
    }

    fn try_load(&self, slug: &str) -> Result<Option<Post>, LoadError> {
        let Some((path, is_mdx)) = self.resolve_file(slug) else {
            return Ok(None);
        };

        let raw = fs::read_to_string(&path)?;
        let (mut frontmatter, body) = parse_frontmatter(&raw)?;

        if frontmatter.draft && self.options.production {
            tracing::debug!(slug = %slug, "Suppressing draft in production build");
            return Ok(None);
        }

        let content = if is_mdx {
            // MDX keeps its raw body; rendering happens downstream
            body.clone()
        } else {
            self.processor.render(&body)
        };

        let reading_time = reading_time_minutes(&body);
        let excerpt = frontmatter
            .description
            .clone()
            .unwrap_or_else(|| generate_excerpt(&body, self.options.excerpt_chars));
        let table_of_contents = extract_table_of_contents(&body);

        let series_info = extract_series_info(slug);
        let series = frontmatter
            .series
            .clone()
            .or_else(|| series_info.as_ref().map(|info| info.name.clone()));
        let series_slug = series_info.map(|info| info.slug);

        // The merged name flows back into the frontmatter view so
        // consumers see a single value; the slug has no override field.
        frontmatter.series = series.clone();

        Ok(Some(Post {
            slug: slug.to_string(),
            frontmatter,
            content,
            is_mdx,
            excerpt,
            reading_time,
            table_of_contents,
            series,
            series_slug,
        }))
    }

    /// Locate the backing file, trying `.md` before `.mdx`.
    fn resolve_file(&self, slug: &str) -> Option<(PathBuf, bool)> {
        for (ext, is_mdx) in [("md", false), ("mdx", true)] {
            let mut path = self.content_dir.clone();
            let mut segments = slug.split('/').peekable();
            while let Some(segment) = segments.next() {
                if segments.peek().is_some() {
                    path.push(segment);
                } else {
                    path.push(format!("{}.{}", segment, ext));
                }
            }
            if path.is_file() {
                return Some((path, is_mdx));
            }
        }
        None
    }
}
