//! The structured document model handed to serializers.

use ecow::EcoString;
use serde::Serialize;

use crate::numbering::{CONTRACT_LIST, DASH_BULLETS, ListRegistration, ListRegistry};
use crate::style::StyleSheet;

/// One inline run of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TextRun {
    /// The run text, empty for a line break.
    pub text: EcoString,
    /// Whether the run is bold.
    pub bold: bool,
    /// Whether the run is a line break.
    pub line_break: bool,
}

impl TextRun {
    /// A plain run.
    pub fn plain(text: impl Into<EcoString>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// A bold run.
    pub fn bold(text: impl Into<EcoString>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            line_break: false,
        }
    }

    /// A zero-width run carrying a line break.
    pub fn line_break() -> Self {
        Self {
            line_break: true,
            ..Default::default()
        }
    }
}

/// The numbering a list paragraph is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberingAnnotation {
    /// The numbering definition reference.
    pub reference: EcoString,
    /// The ordered list instance, absent for bullets.
    pub instance: Option<u32>,
    /// The nesting level, 0 for a top-level list.
    pub level: usize,
    /// Continues the item above a nested list, indented but without a marker.
    pub continued: bool,
}

/// A paragraph made of runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Paragraph {
    /// The runs in order.
    pub runs: Vec<TextRun>,
    /// Set for list item paragraphs.
    pub numbering: Option<NumberingAnnotation>,
}

/// One block of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentElement {
    /// A heading at `level` 1 to 6.
    Heading {
        /// The heading level.
        level: u8,
        /// The heading text.
        text: EcoString,
    },
    /// A body paragraph.
    Paragraph(Paragraph),
    /// A hard page break.
    PageBreak,
    /// The table of contents field.
    TableOfContents,
}

impl DocumentElement {
    /// A paragraph without numbering.
    pub fn paragraph(runs: Vec<TextRun>) -> Self {
        DocumentElement::Paragraph(Paragraph {
            runs,
            numbering: None,
        })
    }
}

/// Page margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMargins {
    /// Top margin.
    pub top: i32,
    /// Right margin.
    pub right: i32,
    /// Bottom margin.
    pub bottom: i32,
    /// Left margin.
    pub left: i32,
}

/// 2.5 cm in twips.
const MARGIN_2_5_CM: i32 = 1417;
/// 1.25 cm in twips.
const INDENT_1_25_CM: i32 = 709;

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            top: MARGIN_2_5_CM,
            right: MARGIN_2_5_CM,
            bottom: MARGIN_2_5_CM,
            left: MARGIN_2_5_CM,
        }
    }
}

/// Text alignment of a numbering marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerAlignment {
    /// Aligned to the start of the line.
    Start,
    /// Aligned left.
    Left,
}

/// One level of a numbering definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberingLevel {
    /// The level, 0 first.
    pub level: usize,
    /// The number format, e.g. `decimal` or `bullet`.
    pub format: EcoString,
    /// The marker template, e.g. `%1)`.
    pub text: EcoString,
    /// The marker alignment.
    pub alignment: MarkerAlignment,
    /// Left indent in twips.
    pub indent_left: Option<i32>,
    /// Hanging indent in twips.
    pub hanging: Option<i32>,
}

impl NumberingLevel {
    fn decimal(level: usize) -> Self {
        Self {
            level,
            format: "decimal".into(),
            text: ecow::eco_format!("%{})", level + 1),
            alignment: MarkerAlignment::Start,
            indent_left: None,
            hanging: None,
        }
    }

    fn indent(mut self, left: i32, hanging: i32) -> Self {
        self.indent_left = Some(left);
        self.hanging = Some(hanging);
        self
    }
}

/// A named numbering definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberingDefinition {
    /// The reference list paragraphs use.
    pub reference: EcoString,
    /// The levels, 0 first.
    pub levels: Vec<NumberingLevel>,
}

impl NumberingDefinition {
    /// The `1)`, `2)`, ... definition shared by ordered lists.
    pub fn contract_list() -> Self {
        let levels = (0..4)
            .map(|level| {
                let def = NumberingLevel::decimal(level);
                if level == 0 { def.indent(720, 260) } else { def }
            })
            .collect();

        Self {
            reference: CONTRACT_LIST.into(),
            levels,
        }
    }

    /// The dash bullet definition shared by unordered lists.
    pub fn dash_bullets() -> Self {
        Self {
            reference: DASH_BULLETS.into(),
            levels: vec![NumberingLevel {
                level: 0,
                format: "bullet".into(),
                text: "-".into(),
                alignment: MarkerAlignment::Left,
                indent_left: Some(INDENT_1_25_CM),
                hanging: Some(INDENT_1_25_CM),
            }],
        }
    }
}

/// The table of contents settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOfContents {
    /// The title of the table.
    pub title: EcoString,
    /// The first heading level listed.
    pub min_level: usize,
    /// The last heading level listed.
    pub max_level: usize,
    /// Whether entries link to their headings.
    pub hyperlink: bool,
}

impl Default for TableOfContents {
    fn default() -> Self {
        Self {
            title: "Summary".into(),
            min_level: 1,
            max_level: 5,
            hyperlink: true,
        }
    }
}

/// A fully composed document, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredDocument {
    /// The page margins.
    pub margins: PageMargins,
    /// The numbering definitions.
    pub numbering: Vec<NumberingDefinition>,
    /// The ordered list instances, in document order.
    pub lists: Vec<ListRegistration>,
    /// The default styles.
    pub styles: StyleSheet,
    /// The table of contents settings.
    pub toc: TableOfContents,
    /// The body elements, starting with the table of contents.
    pub elements: Vec<DocumentElement>,
}

/// Wraps assembled elements into a [`StructuredDocument`].
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    margins: PageMargins,
    styles: StyleSheet,
    toc: TableOfContents,
}

impl DocumentBuilder {
    /// Creates a builder with the contract defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the document.
    ///
    /// A table of contents and a page break are placed before `elements`.
    /// `registry` must be the one the elements were converted with.
    pub fn build(
        &self,
        elements: Vec<DocumentElement>,
        registry: &ListRegistry,
    ) -> StructuredDocument {
        let mut body = Vec::with_capacity(elements.len() + 2);
        body.push(DocumentElement::TableOfContents);
        body.push(DocumentElement::PageBreak);
        body.extend(elements);

        StructuredDocument {
            margins: self.margins,
            numbering: vec![
                NumberingDefinition::contract_list(),
                NumberingDefinition::dash_bullets(),
            ],
            lists: registry.registrations().cloned().collect(),
            styles: self.styles.clone(),
            toc: self.toc.clone(),
            elements: body,
        }
    }
}
