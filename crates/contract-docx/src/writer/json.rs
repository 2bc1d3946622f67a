//! JSON dump of the structured document

use ecow::eco_format;

use crate::document::StructuredDocument;
use crate::writer::FormatWriter;
use crate::{Error, Result};

/// Writes the structured document as pretty printed JSON.
#[derive(Debug, Default, Clone)]
pub struct JsonWriter;

impl JsonWriter {
    /// Create a new JSON writer
    pub fn new() -> Self {
        Self
    }
}

impl FormatWriter for JsonWriter {
    fn write_vec(&mut self, document: &StructuredDocument) -> Result<Vec<u8>> {
        let mut out = serde_json::to_vec_pretty(document)
            .map_err(|e| Error::Serialize(eco_format!("failed to write JSON: {e}")))?;
        out.push(b'\n');
        Ok(out)
    }
}
