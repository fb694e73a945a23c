//! Report markup to WordprocessingML
//!
//!     This crate compiles a line-oriented Markdown subset into WordprocessingML content and
//!     splices it into an existing `word/document.xml`, just before the body's closing section
//!     properties. Everything already in the template (title page, headers, styles referenced by
//!     id) is carried through byte for byte.
//!
//!     This is a pure lib: it powers mdsplice-cli but assumes no shell. Resources are fetched
//!     through a [`ResourceResolver`], output is returned as strings and byte vectors.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── markup                  # Source grammar
//!     │   ├── blocks.rs           # Line classifier
//!     │   ├── inline.rs           # Bold / italic / code run tokenizer
//!     │   └── table.rs            # Pipe row splitting
//!     ├── ir                      # Target document model and insertion cursor
//!     ├── assemble                # Block renderers and the assembler
//!     └── formats
//!         ├── wordml              # document.xml reader and writer
//!         └── treeviz             # Outlines for inspection
//!
//! Pipeline
//!
//!     source ─ parse_source ─▶ [Block] ─ Assembler ─▶ Document ─ WordmlFormat ─▶ XML
//!                                           ▲
//!                    template XML ─ WordmlFormat::parse
//!
//!     Parsing never fails. Assembly fails only when the template body does not hold exactly one
//!     section properties node, and it checks this before changing anything. Images that cannot be
//!     resolved are replaced by placeholder paragraphs and listed in the [`AssemblyReport`].
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # aggregates the subdirectories
//!     ├── assemble
//!     ├── wordml
//!     └── fixtures
//!
//!     Rust does not discover tests in subdirectories by default, so they are included from
//!     tests/lib.rs.

pub mod assemble;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod markup;
pub mod registry;

pub use assemble::{
    AssembleOptions, Assembler, AssemblyReport, AssemblyState, FsResolver, MemoryResolver,
    NoResources, RenderStyle, ResourceResolver,
};
pub use error::{AssemblyError, Error, FormatError, ResourceMissing};
pub use format::Format;
pub use formats::wordml::{media_parts, MediaPart};
pub use ir::nodes::Document;
pub use markup::{parse_source, parse_source_with_options, Block, ParseOptions};
pub use registry::FormatRegistry;

use formats::wordml::WordmlFormat;

/// The result of rendering markup into a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// The complete `document.xml`.
    pub xml: String,
    /// Pictures referenced from `xml`, to be stored under `word/media/`.
    pub media: Vec<MediaPart>,
    pub report: AssemblyReport,
}

/// Parse `source` and splice it into the template `document.xml`.
pub fn render_wordml(
    source: &str,
    template_xml: &str,
    resolver: &dyn ResourceResolver,
    parse_options: &ParseOptions,
    options: AssembleOptions,
) -> Result<Rendered, Error> {
    let format = WordmlFormat;
    let mut doc = format.parse(template_xml)?;
    let blocks = parse_source_with_options(source, parse_options);
    let report = Assembler::with_options(resolver, options).assemble(&blocks, &mut doc)?;
    Ok(Rendered {
        xml: format.serialize(&doc)?,
        media: media_parts(&doc),
        report,
    })
}
