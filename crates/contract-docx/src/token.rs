//! The markup token tree consumed by the converter.
//!
//! Tokens are produced by a tokenizer outside the core (see
//! [`crate::markdown`] for the bundled one) and are only ever borrowed by the
//! converter.

use ecow::EcoString;

/// One markup token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A heading of `depth` 1 to 6.
    Heading {
        /// The heading depth.
        depth: u8,
        /// The plain heading text.
        text: EcoString,
    },
    /// A block paragraph.
    Paragraph {
        /// The flat paragraph text.
        text: EcoString,
        /// The inline children.
        tokens: Vec<Token>,
    },
    /// A run of text, optionally with nested inline tokens.
    Text {
        /// The flat text.
        text: EcoString,
        /// Nested inline tokens, present for the content of tight list items.
        tokens: Option<Vec<Token>>,
    },
    /// A blank-line spacer.
    Space,
    /// An ordered or unordered list.
    List(List),
    /// A single list item.
    ListItem(ListItem),
    /// Strong emphasis.
    Strong {
        /// The literal text.
        text: EcoString,
        /// The nested inline tokens.
        tokens: Vec<Token>,
    },
    /// A hard line break.
    Br,
    /// Anything outside the template vocabulary.
    Other {
        /// The kind name reported by the tokenizer, e.g. `em` or `codespan`.
        kind: EcoString,
        /// The text the token carries, if any.
        text: Option<EcoString>,
    },
}

/// A list token.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// Whether the list is numbered.
    pub ordered: bool,
    /// The list items in order.
    pub items: Vec<ListItem>,
}

/// A list item token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    /// The flat item text.
    pub text: EcoString,
    /// The item content: inline tokens, paragraphs and nested lists.
    pub tokens: Vec<Token>,
}

impl Token {
    /// Creates a text token without nested inline tokens.
    pub fn text(text: impl Into<EcoString>) -> Self {
        Token::Text {
            text: text.into(),
            tokens: None,
        }
    }

    /// Creates a strong token whose only child is its text.
    pub fn strong(text: impl Into<EcoString>) -> Self {
        let text = text.into();
        Token::Strong {
            tokens: vec![Token::text(text.clone())],
            text,
        }
    }

    /// Creates a paragraph token, deriving its flat text from `tokens`.
    pub fn paragraph(tokens: Vec<Token>) -> Self {
        Token::Paragraph {
            text: plain_text(&tokens),
            tokens,
        }
    }

    /// Creates a heading token.
    pub fn heading(depth: u8, text: impl Into<EcoString>) -> Self {
        Token::Heading {
            depth,
            text: text.into(),
        }
    }

    /// Returns the token kind as the tokenizer names it.
    pub fn kind(&self) -> &str {
        match self {
            Token::Heading { .. } => "heading",
            Token::Paragraph { .. } => "paragraph",
            Token::Text { .. } => "text",
            Token::Space => "space",
            Token::List(..) => "list",
            Token::ListItem(..) => "list_item",
            Token::Strong { .. } => "strong",
            Token::Br => "br",
            Token::Other { kind, .. } => kind.as_str(),
        }
    }

    /// Returns the text carried by the token, if any.
    pub fn text_content(&self) -> Option<&EcoString> {
        match self {
            Token::Heading { text, .. }
            | Token::Paragraph { text, .. }
            | Token::Text { text, .. }
            | Token::Strong { text, .. } => Some(text),
            Token::ListItem(item) => Some(&item.text),
            Token::Other { text, .. } => text.as_ref(),
            Token::Space | Token::List(..) | Token::Br => None,
        }
    }
}

impl List {
    /// Creates an ordered list.
    pub fn ordered(items: Vec<ListItem>) -> Self {
        Self {
            ordered: true,
            items,
        }
    }

    /// Creates an unordered list.
    pub fn unordered(items: Vec<ListItem>) -> Self {
        Self {
            ordered: false,
            items,
        }
    }
}

impl ListItem {
    /// Creates an item whose content is a single text token.
    pub fn text(text: impl Into<EcoString>) -> Self {
        let text = text.into();
        Self {
            tokens: vec![Token::text(text.clone())],
            text,
        }
    }

    /// Creates an item from its content tokens, deriving the flat text.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            text: plain_text(&tokens),
            tokens,
        }
    }

    /// Appends a nested list to the item.
    pub fn with_list(mut self, list: List) -> Self {
        self.tokens.push(Token::List(list));
        self
    }
}

/// Concatenates the text carried by `tokens`, rendering breaks as newlines.
pub fn plain_text(tokens: &[Token]) -> EcoString {
    let mut out = EcoString::new();
    for token in tokens {
        match token {
            Token::Br => out.push('\n'),
            Token::List(..) => {}
            token => {
                if let Some(text) = token.text_content() {
                    out.push_str(text);
                }
            }
        }
    }
    out
}
