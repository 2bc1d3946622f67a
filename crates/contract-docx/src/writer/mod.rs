//! Writer implementations for different output formats

#[cfg(feature = "docx")]
pub mod docx;
pub mod json;

#[cfg(feature = "docx")]
pub use self::docx::DocxWriter;
pub use json::JsonWriter;

use crate::document::StructuredDocument;
use crate::Result;

/// Valid output formats.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Format {
    /// The structured document as pretty printed JSON.
    #[default]
    Json,
    /// A word-processor document.
    #[cfg(feature = "docx")]
    Docx,
}

/// Serializes a structured document into bytes.
pub trait FormatWriter {
    /// Writes the document into a byte vector.
    fn write_vec(&mut self, document: &StructuredDocument) -> Result<Vec<u8>>;
}

/// Create a writer instance based on the specified format
pub fn create_writer(format: Format) -> Box<dyn FormatWriter> {
    match format {
        Format::Json => Box::new(JsonWriter::new()),
        #[cfg(feature = "docx")]
        Format::Docx => Box::new(DocxWriter::new()),
    }
}
