//! DOCX writer implementation using docx-rs
//!
//! This module is organized into several main components:
//! - Writer: renders the structured document to DOCX
//! - Styles: document style management
//! - Numbering: list numbering management

mod numbering;
mod styles;
mod writer;

pub use writer::DocxWriter;
