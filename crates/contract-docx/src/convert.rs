//! Token to element conversion.
//!
//! The converter walks one token tree at a time. Ordered lists are registered
//! with the [`ListRegistry`] before their items are converted, so every item
//! paragraph can be annotated with its list's reference and instance.

use log::debug;
use serde::Deserialize;

use crate::document::{DocumentElement, NumberingAnnotation, Paragraph, TextRun};
use crate::numbering::{ListId, ListRegistry};
use crate::style::check_depth;
use crate::token::{List, ListItem, Token};
use crate::{Error, Result};

/// What to do with tokens the converter has no element for.
///
/// This covers `strong` and `br` outside inline content as well as any
/// [`Token::Other`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum UnknownTokenPolicy {
    /// Produce no element.
    #[default]
    Ignore,
    /// Fail with [`Error::UnsupportedToken`].
    Error,
}

/// The list context a token is converted in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionContext {
    /// The ordered list the current items belong to.
    pub current_list: Option<ListId>,
    /// The nesting level of the current items, unset outside lists.
    pub level: Option<usize>,
}

impl ConversionContext {
    /// The context of a token at the top of a section.
    pub fn top_level() -> Self {
        Self::default()
    }

    /// The context of the items of a list opened in this context.
    fn enter_list(self, list: Option<ListId>) -> Self {
        Self {
            current_list: list,
            level: Some(self.level.map_or(0, |level| level + 1)),
        }
    }
}

/// Converts tokens into document elements.
pub struct Converter<'a> {
    registry: &'a mut ListRegistry,
    policy: UnknownTokenPolicy,
}

impl<'a> Converter<'a> {
    /// Creates a converter registering lists in `registry`.
    pub fn new(registry: &'a mut ListRegistry, policy: UnknownTokenPolicy) -> Self {
        Self { registry, policy }
    }

    /// Converts a sequence of top-level tokens.
    pub fn convert_all(&mut self, tokens: &[Token]) -> Result<Vec<DocumentElement>> {
        let mut elements = Vec::new();
        for token in tokens {
            elements.extend(self.convert(token, ConversionContext::top_level())?);
        }
        Ok(elements)
    }

    /// Converts one token into zero or more elements.
    pub fn convert(
        &mut self,
        token: &Token,
        ctx: ConversionContext,
    ) -> Result<Vec<DocumentElement>> {
        match token {
            Token::Heading { depth, text } => Ok(vec![DocumentElement::Heading {
                level: check_depth(*depth)?,
                text: text.clone(),
            }]),
            Token::Text { text, .. } => Ok(vec![DocumentElement::paragraph(vec![
                TextRun::plain(text.clone()),
            ])]),
            Token::Paragraph { text, tokens } => {
                let runs = if tokens.is_empty() && !text.is_empty() {
                    vec![TextRun::plain(text.clone())]
                } else {
                    inline_runs(tokens)
                };
                Ok(vec![DocumentElement::paragraph(runs)])
            }
            Token::Space => Ok(vec![DocumentElement::paragraph(vec![])]),
            Token::List(list) => self.convert_list(list, ctx),
            Token::ListItem(item) => self.convert_item(item, ctx),
            Token::Strong { .. } | Token::Br | Token::Other { .. } => self.skip(token),
        }
    }

    fn convert_list(
        &mut self,
        list: &List,
        ctx: ConversionContext,
    ) -> Result<Vec<DocumentElement>> {
        let current = list
            .ordered
            .then(|| self.registry.register_ordered_list());
        let item_ctx = ctx.enter_list(current);

        let mut elements = Vec::new();
        for item in &list.items {
            elements.extend(self.convert_item(item, item_ctx)?);
        }
        Ok(elements)
    }

    fn convert_item(
        &mut self,
        item: &ListItem,
        ctx: ConversionContext,
    ) -> Result<Vec<DocumentElement>> {
        let level = ctx.level.unwrap_or(0);
        let numbering = match ctx.current_list {
            Some(id) => {
                let list = self.registry.lookup(id).ok_or(Error::UnregisteredList(id))?;
                NumberingAnnotation {
                    reference: list.reference.clone(),
                    instance: Some(list.instance),
                    level,
                    continued: false,
                }
            }
            None => NumberingAnnotation {
                reference: self.registry.bullet_reference().into(),
                instance: None,
                level,
                continued: false,
            },
        };

        // Nested lists split the item: content after one continues the item
        // below it instead of joining the numbered paragraph.
        let mut segments = item.tokens.split(|token| matches!(token, Token::List(..)));
        let nested = item.tokens.iter().filter_map(|token| match token {
            Token::List(list) => Some(list),
            _ => None,
        });

        let mut elements = vec![DocumentElement::Paragraph(Paragraph {
            runs: inline_runs(segments.next().unwrap_or_default()),
            numbering: Some(numbering.clone()),
        })];

        let item_ctx = ConversionContext {
            level: Some(level),
            ..ctx
        };
        for (list, rest) in nested.zip(segments) {
            elements.extend(self.convert_list(list, item_ctx)?);

            let runs = inline_runs(rest);
            if !runs.is_empty() {
                elements.push(DocumentElement::Paragraph(Paragraph {
                    runs,
                    numbering: Some(NumberingAnnotation {
                        continued: true,
                        ..numbering.clone()
                    }),
                }));
            }
        }

        Ok(elements)
    }

    fn skip(&self, token: &Token) -> Result<Vec<DocumentElement>> {
        match self.policy {
            UnknownTokenPolicy::Ignore => {
                debug!("skipping `{}` token outside inline content", token.kind());
                Ok(vec![])
            }
            UnknownTokenPolicy::Error => Err(Error::UnsupportedToken(token.kind().into())),
        }
    }
}

/// Flattens inline tokens into runs, keeping their order.
pub fn inline_runs(tokens: &[Token]) -> Vec<TextRun> {
    let mut runs = Vec::new();

    for child in tokens {
        match child {
            Token::Text {
                tokens: Some(nested),
                ..
            } => {
                for token in nested {
                    match token {
                        Token::Text { text, .. } => runs.push(TextRun::plain(text.clone())),
                        Token::Br => runs.push(TextRun::line_break()),
                        Token::Strong { text, .. } => runs.push(TextRun::bold(text.clone())),
                        other => debug!("dropping nested `{}` token", other.kind()),
                    }
                }
            }
            Token::Text { text, tokens: None } => runs.push(TextRun::plain(text.clone())),
            Token::Br => runs.push(TextRun::line_break()),
            Token::Strong { text, .. } => runs.push(TextRun::bold(text.clone())),
            // Nested lists are converted as blocks by their item.
            Token::List(..) => {}
            other => {
                if let Some(text) = other.text_content() {
                    runs.push(TextRun::plain(text.clone()));
                }
            }
        }
    }

    runs
}
