//! Syntax highlighting for fenced code blocks via syntect.

use crate::markdown::html_escape;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME: OnceLock<Theme> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> &'static Theme {
    THEME.get_or_init(|| {
        let themes = ThemeSet::load_defaults().themes;
        themes
            .get("InspiredGitHub")
            .or_else(|| themes.get("base16-ocean.light"))
            .expect("syntect default themes present")
            .clone()
    })
}

/// Replaces fenced code blocks with highlighted HTML and converts the
/// remaining events to `'static` ownership.
pub struct HighlightTransformer;

impl HighlightTransformer {
    pub fn new() -> Self {
        Self
    }

    pub fn transform(&self, events: Vec<Event<'_>>) -> Vec<Event<'static>> {
        let mut result = Vec::with_capacity(events.len());
        let mut fence: Option<String> = None;
        let mut code = String::new();

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                    fence = Some(lang.to_string());
                    code.clear();
                }
                Event::Text(text) if fence.is_some() => code.push_str(text.as_ref()),
                Event::End(TagEnd::CodeBlock) if fence.is_some() => {
                    let lang = fence.take().unwrap_or_default();
                    let html = if lang.is_empty() {
                        format!("<pre><code>{}</code></pre>\n", html_escape(&code))
                    } else {
                        highlight_block(&code, &lang)
                    };
                    result.push(Event::Html(CowStr::Boxed(html.into_boxed_str())));
                }
                other => result.push(owned_event(other)),
            }
        }

        result
    }
}

impl Default for HighlightTransformer {
    fn default() -> Self {
        Self::new()
    }
}

fn highlight_block(code: &str, lang: &str) -> String {
    let ss = syntax_set();
    let syntax = ss
        .find_syntax_by_token(lang)
        .or_else(|| ss.find_syntax_by_extension(lang))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    highlighted_html_for_string(code, ss, syntax, theme()).unwrap_or_else(|_| {
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            html_escape(lang),
            html_escape(code)
        )
    })
}

fn owned_event(event: Event<'_>) -> Event<'static> {
    match event {
        Event::Start(tag) => Event::Start(owned_tag(tag)),
        Event::End(end) => Event::End(end),
        Event::Text(s) => Event::Text(owned_str(s)),
        Event::Code(s) => Event::Code(owned_str(s)),
        Event::Html(s) => Event::Html(owned_str(s)),
        Event::InlineHtml(s) => Event::InlineHtml(owned_str(s)),
        Event::FootnoteReference(s) => Event::FootnoteReference(owned_str(s)),
        Event::SoftBreak => Event::SoftBreak,
        Event::HardBreak => Event::HardBreak,
        Event::Rule => Event::Rule,
        Event::TaskListMarker(checked) => Event::TaskListMarker(checked),
        Event::InlineMath(s) => Event::InlineMath(owned_str(s)),
        Event::DisplayMath(s) => Event::DisplayMath(owned_str(s)),
    }
}

fn owned_tag(tag: Tag<'_>) -> Tag<'static> {
    match tag {
        Tag::Paragraph => Tag::Paragraph,
        Tag::Heading {
            level,
            id,
            classes,
            attrs,
        } => Tag::Heading {
            level,
            id: id.map(owned_str),
            classes: classes.into_iter().map(owned_str).collect(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (owned_str(k), v.map(owned_str)))
                .collect(),
        },
        Tag::BlockQuote(kind) => Tag::BlockQuote(kind),
        Tag::CodeBlock(CodeBlockKind::Indented) => Tag::CodeBlock(CodeBlockKind::Indented),
        Tag::CodeBlock(CodeBlockKind::Fenced(lang)) => {
            Tag::CodeBlock(CodeBlockKind::Fenced(owned_str(lang)))
        }
        Tag::HtmlBlock => Tag::HtmlBlock,
        Tag::List(start) => Tag::List(start),
        Tag::Item => Tag::Item,
        Tag::FootnoteDefinition(label) => Tag::FootnoteDefinition(owned_str(label)),
        Tag::Table(alignments) => Tag::Table(alignments),
        Tag::TableHead => Tag::TableHead,
        Tag::TableRow => Tag::TableRow,
        Tag::TableCell => Tag::TableCell,
        Tag::Emphasis => Tag::Emphasis,
        Tag::Strong => Tag::Strong,
        Tag::Strikethrough => Tag::Strikethrough,
        Tag::Superscript => Tag::Superscript,
        Tag::Subscript => Tag::Subscript,
        Tag::DefinitionList => Tag::DefinitionList,
        Tag::DefinitionListTitle => Tag::DefinitionListTitle,
        Tag::DefinitionListDefinition => Tag::DefinitionListDefinition,
        Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        } => Tag::Link {
            link_type,
            dest_url: owned_str(dest_url),
            title: owned_str(title),
            id: owned_str(id),
        },
        Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        } => Tag::Image {
            link_type,
            dest_url: owned_str(dest_url),
            title: owned_str(title),
            id: owned_str(id),
        },
        Tag::MetadataBlock(kind) => Tag::MetadataBlock(kind),
    }
}

fn owned_str(s: CowStr<'_>) -> CowStr<'static> {
    CowStr::Boxed(s.into_string().into_boxed_str())
}
