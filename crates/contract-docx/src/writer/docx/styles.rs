//! Document style management for DOCX output

use docx_rs::*;

use crate::style::{ParagraphStyle, StyleSheet};

/// Document style management
#[derive(Clone, Debug)]
pub struct DocxStyles<'a> {
    sheet: &'a StyleSheet,
}

impl<'a> DocxStyles<'a> {
    /// Create a style manager for a style sheet
    pub fn new(sheet: &'a StyleSheet) -> Self {
        Self { sheet }
    }

    fn fonts(family: &str) -> RunFonts {
        RunFonts::new()
            .ascii(family)
            .hi_ansi(family)
            .east_asia(family)
            .cs(family)
    }

    /// Create a paragraph style from its defaults
    fn create_paragraph_style(style: &ParagraphStyle) -> Style {
        let mut docx_style = Style::new(style.id.as_str(), StyleType::Paragraph)
            .name(style.name.as_str())
            .fonts(Self::fonts(&style.font))
            .size(style.size)
            .color(style.color.as_str());

        if style.bold {
            docx_style = docx_style.bold();
        }
        if style.italic {
            docx_style = docx_style.italic();
        }
        if let Some(next) = &style.next {
            docx_style = docx_style.next(next.as_str());
        }

        docx_style
    }

    /// Initialize all document styles
    pub fn initialize_styles(&self, docx: Docx) -> Docx {
        let normal = &self.sheet.normal;
        let mut docx = docx
            .default_fonts(Self::fonts(&normal.font))
            .default_size(normal.size)
            .add_style(Self::create_paragraph_style(normal));

        for heading in &self.sheet.headings {
            docx = docx.add_style(Self::create_paragraph_style(heading));
        }

        docx
    }
}
