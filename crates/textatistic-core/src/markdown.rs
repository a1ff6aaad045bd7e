//! Markdown to prose.
//!
//! Readability formulas expect running prose. Markdown sources carry code,
//! tables and headings that would count as words without sentence
//! punctuation, so [`strip_to_prose`] keeps only what a reader reads as
//! sentences.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, returning plain prose text.
///
/// Dropped entirely: YAML frontmatter, fenced and indented code, inline
/// code, raw HTML, headings, tables and image alt text. Kept without their
/// markers: paragraphs, list items, blockquotes, emphasis and link text.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let body = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let mut prose = String::with_capacity(body.len());
    let mut hidden: usize = 0;

    for event in Parser::new_ext(body, options) {
        match event {
            Event::Start(
                Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_) | Tag::Image { .. },
            ) => hidden += 1,
            Event::End(
                TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table | TagEnd::Image,
            ) => hidden = hidden.saturating_sub(1),
            Event::Text(t) if hidden == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if hidden == 0 => prose.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Item) if hidden == 0 => prose.push(' '),
            _ => {}
        }
    }

    let prose = prose.trim_end().to_string();
    tracing::debug!(prose_len = prose.len(), "stripped markdown");
    prose
}

/// The body after a leading `---` frontmatter block, or all of `text`.
fn strip_frontmatter(text: &str) -> &str {
    let Some(after_open) = text.trim_start().strip_prefix("---") else {
        return text;
    };
    let Some(close) = after_open.find("\n---") else {
        return text;
    };
    let rest = &after_open[close + 4..];
    rest.strip_prefix('\n').unwrap_or(rest)
}
