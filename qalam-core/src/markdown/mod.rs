//! Markdown to HTML rendering.

pub mod highlight;

use crate::toc::{heading_slug, SlugUniquifier};
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

pub use highlight::HighlightTransformer;

/// Markdown renderer used for `.md` post bodies.
///
/// Full Markdown with table and strikethrough extensions, raw HTML
/// passthrough, syntect-highlighted fenced code blocks, and headings
/// that carry generated ids with wrap-style self-links.
pub struct MarkdownProcessor {
    options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Convert a markdown body to HTML.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let events: Vec<Event> = parser.collect();

        // Highlighting first: it also converts every event to 'static
        let events = HighlightTransformer::new().transform(events);

        let events = attach_heading_ids(events);
        let events = wrap_heading_links(events);

        let mut output = String::new();
        html::push_html(&mut output, events.into_iter());
        output
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Give every heading without an explicit id a slug derived from its
/// text, uniquified across the document so duplicate headings get
/// `-1`, `-2`, ... suffixes.
fn attach_heading_ids(events: Vec<Event<'static>>) -> Vec<Event<'static>> {
    // First pass: collect the text of each heading in document order.
    let mut texts: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for event in &events {
        match event {
            Event::Start(Tag::Heading { .. }) => current = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(text.as_ref());
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = current.take() {
                    texts.push(text);
                }
            }
            _ => {}
        }
    }

    let mut uniquifier = SlugUniquifier::new();
    let mut ids = texts
        .iter()
        .map(|t| uniquifier.apply(&heading_slug(t)))
        .collect::<Vec<_>>()
        .into_iter();

    // Second pass: attach the ids.
    events
        .into_iter()
        .map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let next = ids.next();
                let id = id.or_else(|| next.map(|s| CowStr::Boxed(s.into_boxed_str())));
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                })
            }
            other => other,
        })
        .collect()
}

/// Wrap each heading's content in a self-link to its own anchor.
fn wrap_heading_links(events: Vec<Event<'static>>) -> Vec<Event<'static>> {
    let mut result = Vec::with_capacity(events.len());
    let mut open_id: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                open_id = id.as_ref().map(|s| s.to_string());
                result.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
                if let Some(id) = &open_id {
                    let anchor = format!("<a href=\"#{}\">", html_escape(id));
                    result.push(Event::InlineHtml(CowStr::Boxed(anchor.into_boxed_str())));
                }
            }
            Event::End(TagEnd::Heading(level)) => {
                if open_id.take().is_some() {
                    result.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                }
                result.push(Event::End(TagEnd::Heading(level)));
            }
            other => result.push(other),
        }
    }

    result
}

pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
