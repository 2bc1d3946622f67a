//! DOCX document writer implementation

use std::io::Cursor;

use docx_rs::*;
use ecow::eco_format;
use log::{debug, warn};

use crate::document::{
    DocumentElement, Paragraph as DocParagraph, StructuredDocument, TableOfContents as Toc,
    TextRun,
};
use crate::style::heading_style;
use crate::writer::FormatWriter;
use crate::{Error, Result};

use super::numbering::DocxNumbering;
use super::styles::DocxStyles;

/// DOCX writer that packs a [`StructuredDocument`] into `.docx` bytes
#[derive(Debug)]
pub struct DocxWriter {
    numbering: DocxNumbering,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxWriter {
    /// Create a new DOCX writer
    pub fn new() -> Self {
        Self {
            numbering: DocxNumbering::new(),
        }
    }

    /// Process a run and return the DOCX run
    fn process_run(run: &TextRun) -> Run {
        if run.line_break {
            return Run::new().add_break(BreakType::TextWrapping);
        }

        let docx_run = Run::new().add_text(run.text.as_str());
        if run.bold { docx_run.bold() } else { docx_run }
    }

    /// Process paragraph and add to document
    fn process_paragraph(&self, docx: Docx, paragraph: &DocParagraph) -> Docx {
        let mut para = Paragraph::new();

        if let Some(numbering) = paragraph.numbering.as_ref().filter(|n| n.continued) {
            if let Some(left) = self
                .numbering
                .level_indent(&numbering.reference, numbering.level)
            {
                para = para.indent(Some(left), None, None, None);
            }
        } else if let Some(numbering) = &paragraph.numbering {
            match self
                .numbering
                .numbering_id(&numbering.reference, numbering.instance)
            {
                Some(id) => {
                    para = para.numbering(NumberingId::new(id), IndentLevel::new(numbering.level));
                }
                None => warn!(
                    "no DOCX numbering for {:?} instance {:?}",
                    numbering.reference, numbering.instance
                ),
            }
        }

        for run in &paragraph.runs {
            para = para.add_run(Self::process_run(run));
        }

        docx.add_paragraph(para)
    }

    fn table_of_contents(toc: &Toc) -> TableOfContents {
        let table = TableOfContents::new()
            .heading_styles_range(toc.min_level, toc.max_level)
            .alias(toc.title.as_str());

        if toc.hyperlink { table.hyperlink() } else { table }
    }

    /// Process element and add to document
    fn process_element(&self, docx: Docx, element: &DocumentElement, toc: &Toc) -> Result<Docx> {
        Ok(match element {
            DocumentElement::Heading { level, text } => {
                let style = heading_style(*level)?;
                docx.add_paragraph(
                    Paragraph::new()
                        .style(style.as_str())
                        .add_run(Run::new().add_text(text.as_str())),
                )
            }
            DocumentElement::Paragraph(paragraph) => self.process_paragraph(docx, paragraph),
            DocumentElement::PageBreak => {
                docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            }
            DocumentElement::TableOfContents => {
                docx.add_table_of_contents(Self::table_of_contents(toc))
            }
        })
    }

    /// Generate DOCX document
    pub fn generate_docx(&mut self, doc: &StructuredDocument) -> Result<Vec<u8>> {
        let margins = doc.margins;
        let mut docx = Docx::new().page_margin(
            PageMargin::new()
                .top(margins.top)
                .right(margins.right)
                .bottom(margins.bottom)
                .left(margins.left),
        );

        docx = DocxStyles::new(&doc.styles).initialize_styles(docx);
        docx = self
            .numbering
            .initialize_numbering(docx, &doc.numbering, &doc.lists);

        for element in &doc.elements {
            docx = self.process_element(docx, element, &doc.toc)?;
        }
        debug!("packing {} elements into DOCX", doc.elements.len());

        let mut buffer = Vec::new();
        docx.build()
            .pack(&mut Cursor::new(&mut buffer))
            .map_err(|e| Error::Serialize(eco_format!("failed to pack DOCX: {e}")))?;

        Ok(buffer)
    }
}

impl FormatWriter for DocxWriter {
    fn write_vec(&mut self, document: &StructuredDocument) -> Result<Vec<u8>> {
        self.numbering = DocxNumbering::new();
        self.generate_docx(document)
    }
}
