//! WordprocessingML (`word/document.xml`) format
//!
//! Reads a template body into a [`Document`] and writes it back. Template content is carried as
//! raw XML, so a document that was parsed and not modified serializes to the exact input text.
//! The package around `document.xml` (zip container, relationships part, media folder) is the
//! caller's business; [`media_parts`] lists what needs storing.

mod media;
mod parser;
mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;

pub use media::{media_parts, relationships_xml, MediaPart, REL_ID_PREFIX};
pub use serializer::escape_xml;

/// Main WordprocessingML namespace.
pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Prefix generated markup is written with.
pub const WML_PREFIX: &str = "w";

#[derive(Debug, Clone, Copy, Default)]
pub struct WordmlFormat;

impl Format for WordmlFormat {
    fn name(&self) -> &str {
        "wordml"
    }

    fn description(&self) -> &str {
        "WordprocessingML document part (word/document.xml)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_document(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_document(doc))
    }
}
