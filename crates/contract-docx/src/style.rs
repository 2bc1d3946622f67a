//! Fixed paragraph and heading styles of a contract.

use ecow::EcoString;
use serde::Serialize;

use crate::{Error, Result};

/// Font used for body text and headings.
pub const FONT_FAMILY: &str = "Times New Roman";
/// Body text size in half-points.
pub const BODY_SIZE: usize = 24;
/// Text colour as an RGB hex string.
pub const TEXT_COLOR: &str = "000000";

/// Heading sizes in half-points, indexed by depth - 1.
const HEADING_SIZES: [usize; 6] = [32, 28, 24, 24, 22, 20];

/// Visual defaults of a paragraph style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphStyle {
    /// The style id, e.g. `Normal` or `Heading1`.
    pub id: EcoString,
    /// The display name.
    pub name: EcoString,
    /// The font family.
    pub font: EcoString,
    /// The size in half-points.
    pub size: usize,
    /// The RGB hex colour.
    pub color: EcoString,
    /// Whether runs are bold.
    pub bold: bool,
    /// Whether runs are italic.
    pub italic: bool,
    /// The style applied to the paragraph that follows.
    pub next: Option<EcoString>,
}

/// The default style sheet of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleSheet {
    /// The body paragraph style.
    pub normal: ParagraphStyle,
    /// One heading style per depth, `Heading1` first.
    pub headings: Vec<ParagraphStyle>,
}

impl ParagraphStyle {
    /// The `Normal` body style.
    pub fn normal() -> Self {
        Self {
            id: "Normal".into(),
            name: "Normal".into(),
            font: FONT_FAMILY.into(),
            size: BODY_SIZE,
            color: TEXT_COLOR.into(),
            bold: false,
            italic: false,
            next: None,
        }
    }

    fn heading(depth: u8, size: usize) -> Self {
        Self {
            id: heading_style_id(depth),
            name: ecow::eco_format!("Heading {depth}"),
            font: FONT_FAMILY.into(),
            size,
            color: TEXT_COLOR.into(),
            bold: true,
            italic: false,
            next: Some("Normal".into()),
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        let headings = HEADING_SIZES
            .iter()
            .zip(1u8..)
            .map(|(size, depth)| ParagraphStyle::heading(depth, *size))
            .collect();

        Self {
            normal: ParagraphStyle::normal(),
            headings,
        }
    }
}

impl StyleSheet {
    /// Returns the style for a heading depth.
    pub fn heading(&self, depth: u8) -> Result<&ParagraphStyle> {
        check_depth(depth)?;
        self.headings
            .get(usize::from(depth) - 1)
            .ok_or(Error::InvalidDepth(depth))
    }
}

/// Returns the style id of a heading depth, e.g. `Heading3`.
pub fn heading_style(depth: u8) -> Result<EcoString> {
    check_depth(depth)?;
    Ok(heading_style_id(depth))
}

/// Fails with [`Error::InvalidDepth`] outside `1..=6`.
pub fn check_depth(depth: u8) -> Result<u8> {
    if (1..=6).contains(&depth) {
        Ok(depth)
    } else {
        Err(Error::InvalidDepth(depth))
    }
}

fn heading_style_id(depth: u8) -> EcoString {
    ecow::eco_format!("Heading{depth}")
}
