//! Document model (IR)
//!
//!     The assembler writes into a [`nodes::Document`]: an ordered list of body nodes made of
//!     opaque template content, generated paragraphs and tables, and exactly one section
//!     properties node that closes the body. Formats (see `crate::formats`) read templates into
//!     this model and write it back out.
//!
//!     Generated nodes carry resolved formatting (fonts, sizes, indents, alignment) rather than
//!     markup, so serializers never need to know about the source grammar.

pub mod cursor;
pub mod nodes;

pub use cursor::InsertionCursor;
