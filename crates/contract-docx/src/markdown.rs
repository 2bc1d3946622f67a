//! Markdown token source.
//!
//! Lexes rendered section text into the [`Token`] tree the converter consumes,
//! using `pulldown-cmark`. The shapes follow the section templates:
//!
//! - a tight list item keeps its inline content as one `text` token with
//!   nested inline tokens, a loose item keeps its paragraphs;
//! - a blank line between two top-level blocks becomes a `space` token,
//!   except after headings, code blocks and rules;
//! - anything outside headings, paragraphs, lists, bold text and line breaks
//!   becomes an `other` token carrying its plain text.

use std::ops::Range;

use ecow::EcoString;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

use crate::token::{List, ListItem, Token, plain_text};

/// Lexes `text` into top-level tokens.
pub fn lex(text: &str) -> Vec<Token> {
    let events: Vec<_> = Parser::new_ext(text, Options::empty())
        .into_offset_iter()
        .collect();

    MarkdownLexer {
        source: text,
        events: events.into_iter(),
    }
    .top_level()
}

struct MarkdownLexer<'a> {
    source: &'a str,
    events: std::vec::IntoIter<(Event<'a>, Range<usize>)>,
}

impl<'a> MarkdownLexer<'a> {
    fn top_level(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last: Option<Range<usize>> = None;

        while let Some((event, range)) = self.events.next() {
            if let Some(prev) = &last
                && self.blank_line_between(prev, &range)
            {
                tokens.push(Token::Space);
            }
            // Headings, code blocks and rules swallow the blank lines after them.
            last = (!absorbs_blank_lines(&event)).then_some(range);

            match event {
                Event::Start(tag) => tokens.push(self.block(tag)),
                Event::End(_) => {}
                Event::Rule => tokens.push(other("hr", None)),
                Event::Html(html) => tokens.push(other("html", Some(EcoString::from(&*html)))),
                event => {
                    let mut inline = Vec::new();
                    self.inline(event, &mut inline);
                    tokens.extend(inline);
                }
            }
        }

        tokens
    }

    /// Whether at least one blank line separates two top-level blocks.
    fn blank_line_between(&self, prev: &Range<usize>, next: &Range<usize>) -> bool {
        let Some(gap) = self.source.get(prev.end..next.start) else {
            return false;
        };
        let trailing = self
            .source
            .get(prev.clone())
            .unwrap_or_default()
            .chars()
            .rev()
            .take_while(|c| c.is_whitespace())
            .filter(|c| *c == '\n')
            .count();

        trailing + gap.matches('\n').count() >= 2
    }

    fn block(&mut self, tag: Tag<'a>) -> Token {
        match tag {
            Tag::Heading(level, ..) => {
                let inline = self.inlines();
                Token::heading(heading_depth(level), plain_text(&inline))
            }
            Tag::Paragraph => Token::paragraph(self.inlines()),
            Tag::List(start) => Token::List(self.list(start.is_some())),
            Tag::Item => Token::ListItem(self.item()),
            tag => {
                let text = self.skip_block();
                other(block_kind(&tag), (!text.is_empty()).then_some(text))
            }
        }
    }

    fn list(&mut self, ordered: bool) -> List {
        let mut items = Vec::new();
        while let Some((event, _)) = self.events.next() {
            match event {
                Event::Start(Tag::Item) => items.push(self.item()),
                Event::End(_) => break,
                _ => {}
            }
        }

        List { ordered, items }
    }

    fn item(&mut self) -> ListItem {
        let mut tokens = Vec::new();
        let mut inline = Vec::new();

        while let Some((event, _)) = self.events.next() {
            match event {
                Event::End(_) => break,
                Event::Start(tag) if is_block(&tag) => {
                    flush_inline(&mut inline, &mut tokens);
                    tokens.push(self.block(tag));
                }
                event => self.inline(event, &mut inline),
            }
        }
        flush_inline(&mut inline, &mut tokens);

        ListItem::new(tokens)
    }

    /// Reads inline events up to the end of the enclosing tag.
    fn inlines(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some((event, _)) = self.events.next() {
            match event {
                Event::End(_) => break,
                event => self.inline(event, &mut tokens),
            }
        }
        tokens
    }

    fn inline(&mut self, event: Event<'a>, tokens: &mut Vec<Token>) {
        match event {
            Event::Text(text) => push_text(tokens, &text),
            Event::SoftBreak => push_text(tokens, " "),
            Event::HardBreak => tokens.push(Token::Br),
            Event::Code(code) => tokens.push(other("codespan", Some(EcoString::from(&*code)))),
            Event::Html(html) => tokens.push(other("html", Some(EcoString::from(&*html)))),
            Event::FootnoteReference(name) => {
                tokens.push(other("footnote", Some(EcoString::from(&*name))))
            }
            Event::Rule => tokens.push(other("hr", None)),
            Event::TaskListMarker(_) => {}
            Event::Start(Tag::Strong) => {
                let children = self.inlines();
                tokens.push(Token::Strong {
                    text: plain_text(&children),
                    tokens: children,
                });
            }
            Event::Start(tag) => {
                let children = self.inlines();
                tokens.push(other(inline_kind(&tag), Some(plain_text(&children))));
            }
            Event::End(_) => {}
        }
    }

    /// Skips a block, keeping its text.
    fn skip_block(&mut self) -> EcoString {
        let mut depth = 0usize;
        let mut text = EcoString::new();

        while let Some((event, _)) = self.events.next() {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => break,
                Event::End(_) => depth -= 1,
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                _ => {}
            }
        }

        text
    }
}

fn absorbs_blank_lines(event: &Event) -> bool {
    matches!(
        event,
        Event::Start(Tag::Heading(..) | Tag::CodeBlock(..)) | Event::Rule
    )
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn is_block(tag: &Tag) -> bool {
    matches!(
        tag,
        Tag::Paragraph
            | Tag::Heading(..)
            | Tag::BlockQuote
            | Tag::CodeBlock(..)
            | Tag::List(..)
            | Tag::Item
            | Tag::FootnoteDefinition(..)
            | Tag::Table(..)
            | Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell
    )
}

fn block_kind(tag: &Tag) -> &'static str {
    match tag {
        Tag::BlockQuote => "blockquote",
        Tag::CodeBlock(..) => "code",
        Tag::Table(..) => "table",
        Tag::FootnoteDefinition(..) => "footnote",
        _ => "block",
    }
}

fn inline_kind(tag: &Tag) -> &'static str {
    match tag {
        Tag::Emphasis => "em",
        Tag::Strikethrough => "del",
        Tag::Link(..) => "link",
        Tag::Image(..) => "image",
        _ => "inline",
    }
}

fn other(kind: &str, text: Option<EcoString>) -> Token {
    Token::Other {
        kind: kind.into(),
        text,
    }
}

/// Appends text, merging it into a preceding plain text token.
fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Text {
        text: last,
        tokens: None,
    }) = tokens.last_mut()
    {
        last.push_str(text);
    } else {
        tokens.push(Token::text(text));
    }
}

/// Wraps the pending inline content of a tight list item.
fn flush_inline(inline: &mut Vec<Token>, tokens: &mut Vec<Token>) {
    if inline.is_empty() {
        return;
    }
    let nested = std::mem::take(inline);
    tokens.push(Token::Text {
        text: plain_text(&nested),
        tokens: Some(nested),
    });
}
