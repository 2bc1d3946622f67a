//! # contract-docx
//!
//! Assembles rendered contract sections into one styled, paginated document.
//!
//! Sections arrive as [`Token`] trees, either built directly or lexed from
//! Markdown with [`markdown::lex`]. The [`Engine`] converts them in order,
//! numbering every ordered list as its own instance of the contract list, and
//! wraps the result in a [`StructuredDocument`] that a [`writer`] turns into
//! bytes.

pub mod assemble;
pub mod convert;
pub mod document;
mod error;
pub mod manifest;
pub mod markdown;
pub mod numbering;
pub mod style;
pub mod token;
pub mod writer;

pub use error::*;

pub use crate::assemble::Section;
pub use crate::convert::UnknownTokenPolicy;
pub use crate::document::{DocumentElement, StructuredDocument};
pub use crate::manifest::Manifest;
pub use crate::token::Token;
pub use crate::writer::Format;

use log::info;

use crate::assemble::assemble;
use crate::document::DocumentBuilder;
use crate::numbering::ListRegistry;
use crate::writer::create_writer;

/// Renders section sequences into structured documents.
///
/// Every call to [`Engine::render`] starts with an empty list registry, so
/// rendering the same sections twice yields the same document.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    policy: UnknownTokenPolicy,
    builder: DocumentBuilder,
}

impl Engine {
    /// Create a new engine with the contract defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set what happens to tokens without a document element
    pub fn with_policy(mut self, policy: UnknownTokenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Assembles `sections` into a document.
    pub fn render(&self, sections: &[Section]) -> Result<StructuredDocument> {
        let mut registry = ListRegistry::new();
        let elements = assemble(sections, &mut registry, self.policy)?;
        let doc = self.builder.build(elements, &registry);

        info!(
            "assembled {} sections into {} elements, {} numbered lists",
            sections.len(),
            doc.elements.len(),
            registry.len()
        );
        Ok(doc)
    }

    /// Assembles `sections` and serializes the document as `format`.
    pub fn render_to_vec(&self, sections: &[Section], format: Format) -> Result<Vec<u8>> {
        let doc = self.render(sections)?;
        create_writer(format).write_vec(&doc)
    }
}

#[cfg(test)]
mod tests;
