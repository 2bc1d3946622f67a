//! Section assembly.

use ecow::EcoString;
use log::debug;

use crate::convert::{Converter, UnknownTokenPolicy};
use crate::document::DocumentElement;
use crate::numbering::ListRegistry;
use crate::token::Token;
use crate::Result;

/// One named, already tokenized part of the contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// The section name, e.g. `definities`.
    pub name: EcoString,
    /// The section tokens.
    pub tokens: Vec<Token>,
}

impl Section {
    /// Creates a section.
    pub fn new(name: impl Into<EcoString>, tokens: Vec<Token>) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }
}

/// Converts `sections` in order, separating them with page breaks.
///
/// All sections share `registry`, so ordered list instances keep counting
/// across section boundaries. The first failing section aborts the run.
pub fn assemble(
    sections: &[Section],
    registry: &mut ListRegistry,
    policy: UnknownTokenPolicy,
) -> Result<Vec<DocumentElement>> {
    let mut elements = Vec::new();
    let mut converter = Converter::new(registry, policy);

    for (i, section) in sections.iter().enumerate() {
        let converted = converter.convert_all(&section.tokens)?;
        debug!(
            "section {:?}: {} tokens, {} elements",
            section.name,
            section.tokens.len(),
            converted.len()
        );
        elements.extend(converted);

        if i + 1 < sections.len() {
            elements.push(DocumentElement::PageBreak);
        }
    }

    Ok(elements)
}
