//! Heading extraction and table-of-contents slugs.

use crate::models::TocItem;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static ATX_HEADING: OnceLock<Regex> = OnceLock::new();

fn atx_heading() -> &'static Regex {
    ATX_HEADING.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap())
}

/// Slugify heading text for use as an anchor id.
///
/// Lowercase, whitespace to hyphens, everything outside Unicode
/// letters/numbers/hyphen stripped, repeated hyphens collapsed,
/// leading/trailing hyphens trimmed. Text that strips to nothing
/// falls back to the literal `"heading"`.
pub fn heading_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if c.is_alphanumeric() {
            slug.push(c);
        }
        // everything else is dropped, without breaking hyphen collapse
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "heading".to_string()
    } else {
        slug.to_string()
    }
}

/// Disambiguates duplicate heading slugs within one document.
///
/// The first occurrence keeps the bare slug; later occurrences get
/// `-1`, `-2`, ... suffixes in order of collision.
#[derive(Debug, Default)]
pub struct SlugUniquifier {
    seen: HashMap<String, usize>,
}

impl SlugUniquifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, base: &str) -> String {
        let count = self.seen.entry(base.to_string()).or_insert(0);
        let slug = if *count == 0 {
            base.to_string()
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        slug
    }
}

/// Extract ATX-style headings (`#` through `######`) from raw Markdown.
///
/// Scans line by line; each heading yields a [`TocItem`] with a
/// document-unique id.
pub fn extract_table_of_contents(markdown: &str) -> Vec<TocItem> {
    let re = atx_heading();
    let mut uniquifier = SlugUniquifier::new();
    let mut items = Vec::new();

    for line in markdown.lines() {
        let Some(captures) = re.captures(line) else {
            continue;
        };

        let level = captures[1].len() as u8;
        let text = captures[2].trim().to_string();
        let id = uniquifier.apply(&heading_slug(&text));

        items.push(TocItem { id, text, level });
    }

    items
}
