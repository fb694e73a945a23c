//! Error types for parsing templates, serializing documents and assembling content

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// The fatal failure of an assembly run.
///
/// Nodes are ordered relative to the section properties marker, so a target document without
/// exactly one of them cannot be populated. The check runs before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("target document must contain exactly one section properties marker, found {found}")]
    StructuralPrecondition { found: usize },
}

/// An image reference that the resolver could not satisfy.
///
/// Never returned from assembly: the image builder turns it into a placeholder paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("resource '{path}' could not be resolved")]
pub struct ResourceMissing {
    pub path: String,
}

/// Any failure of the one-shot template rendering helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
