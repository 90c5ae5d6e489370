//! Text utilities: script classification, reading time, excerpts.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Default excerpt budget in characters.
pub const DEFAULT_EXCERPT_CHARS: usize = 160;

const WORDS_PER_MINUTE: usize = 200;

/// Classify text as predominantly Arabic-script.
///
/// Counts characters in the Arabic Unicode block (U+0600–U+06FF)
/// against all non-whitespace characters; true iff the Arabic fraction
/// strictly exceeds 0.3. Empty or all-whitespace input is not Arabic.
pub fn is_arabic_text(text: &str) -> bool {
    let mut arabic = 0usize;
    let mut total = 0usize;

    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        total += 1;
        if ('\u{0600}'..='\u{06FF}').contains(&c) {
            arabic += 1;
        }
    }

    // arabic / total > 0.3, kept in integer arithmetic so the 0.3
    // boundary itself classifies as non-Arabic
    arabic * 10 > total * 3
}

/// Estimate reading time in whole minutes at 200 words per minute.
///
/// Zero-word content yields 0; callers special-case it into
/// "less than a minute" phrasing. Any non-empty content yields >= 1.
pub fn reading_time_minutes(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE) as u32
}

static HEADING_MARKS: OnceLock<Regex> = OnceLock::new();
static BOLD_MARKS: OnceLock<Regex> = OnceLock::new();
static ITALIC_MARKS: OnceLock<Regex> = OnceLock::new();
static LINK_SYNTAX: OnceLock<Regex> = OnceLock::new();
static INLINE_CODE: OnceLock<Regex> = OnceLock::new();
static CODE_BLOCKS: OnceLock<Regex> = OnceLock::new();

/// Generate a plain-text excerpt from raw (pre-render) Markdown.
///
/// Strips heading markers, bold/italic markers, link syntax (keeping
/// the link text), inline code markers, and fenced code blocks, then
/// collapses whitespace runs. Output longer than `max_chars` is
/// truncated at a trimmed boundary with `"..."` appended; shorter
/// output is returned verbatim.
///
/// Best-effort approximation: nested emphasis and reference-style
/// links are not handled.
pub fn generate_excerpt(content: &str, max_chars: usize) -> String {
    let blocks = CODE_BLOCKS.get_or_init(|| Regex::new(r"(?s)```.*?```").unwrap());
    let headings = HEADING_MARKS.get_or_init(|| Regex::new(r"#{1,6}\s").unwrap());
    let bold = BOLD_MARKS.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
    let italic = ITALIC_MARKS.get_or_init(|| Regex::new(r"\*(.+?)\*").unwrap());
    let links = LINK_SYNTAX.get_or_init(|| Regex::new(r"\[(.+?)\]\(.+?\)").unwrap());
    let code = INLINE_CODE.get_or_init(|| Regex::new(r"`(.+?)`").unwrap());

    // Fenced blocks go first so their backtick fences are not consumed
    // by the inline-code pattern.
    let text = blocks.replace_all(content, "");
    let text = headings.replace_all(&text, "");
    let text = bold.replace_all(&text, "$1");
    let text = italic.replace_all(&text, "$1");
    let text = links.replace_all(&text, "$1");
    let text = code.replace_all(&text, "$1");

    let plain = text.split_whitespace().collect::<Vec<_>>().join(" ");

    // Grapheme clusters, so combined sequences are never split mid-cluster
    let graphemes: Vec<&str> = plain.graphemes(true).collect();
    if graphemes.len() <= max_chars {
        return plain;
    }

    let truncated: String = graphemes[..max_chars].concat();
    format!("{}...", truncated.trim_end())
}
