//! Report markup: the source grammar
//!
//!     The markup is a small, line-oriented subset of Markdown. Parsing happens in two layers:
//!
//!     - [`blocks`]: classifies source lines into [`Block`] records (headings, paragraphs, list
//!       lines, pipe tables, fenced code, images, rules and blank lines).
//!     - [`inline`]: splits the text of a single textual block into styled [`Run`]s.
//!
//!     Both layers are total. Irregular input (an unterminated fence, a pipe line without a
//!     separator row, an unmatched `*`) is absorbed by a fallback rule and never reported.
//!
//!     Blocks carry everything the assembler needs to decide how to render them, including the
//!     `appendix` flag on headings, so nothing downstream inspects rendered text.

pub mod blocks;
pub mod inline;
pub mod table;

pub use blocks::{
    parse_blocks, parse_blocks_with_options, parse_source, parse_source_with_options,
};
pub use inline::{tokenize, InlineStyle, Run};

use serde::Serialize;

/// Markers that flag a heading as the start of the appendix.
pub const DEFAULT_APPENDIX_MARKERS: &[&str] = &["appendix", "приложени"];

/// Knobs for the block parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Substrings (compared case-insensitively) that mark an appendix heading.
    pub appendix_markers: Vec<String>,
    /// Drop everything before the first `## 1.` heading (title block, table of contents).
    /// Sources without such a heading are parsed whole.
    pub skip_front_matter: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            appendix_markers: DEFAULT_APPENDIX_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
            skip_front_matter: false,
        }
    }
}

impl ParseOptions {
    /// Whether a heading text contains one of the appendix markers.
    pub fn is_appendix_heading(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.appendix_markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| lowered.contains(&marker.to_lowercase()))
    }
}

/// One classified unit of parsed markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading(Heading),
    Paragraph { text: String },
    Bullet { text: String },
    Numbered { text: String },
    Table(TableBlock),
    Code(CodeBlock),
    Image(ImageRef),
    HorizontalRule,
    Blank,
}

impl Block {
    /// Short name used in logs and tree views.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading(_) => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Bullet { .. } => "bullet",
            Block::Numbered { .. } => "numbered",
            Block::Table(_) => "table",
            Block::Code(_) => "code",
            Block::Image(_) => "image",
            Block::HorizontalRule => "horizontal_rule",
            Block::Blank => "blank",
        }
    }
}

/// Outline level of a heading. Four or more `#` collapse into [`HeadingLevel::Three`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl HeadingLevel {
    /// Map the length of a `#` run to a level.
    pub fn from_marker_len(hashes: usize) -> Self {
        match hashes {
            0 | 1 => HeadingLevel::One,
            2 => HeadingLevel::Two,
            _ => HeadingLevel::Three,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::One => 1,
            HeadingLevel::Two => 2,
            HeadingLevel::Three => 3,
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: HeadingLevel,
    /// Heading text with the `#` marker removed. Numeric prefixes are kept here and stripped
    /// only when rendering.
    pub text: String,
    /// Set when the text contains an appendix marker.
    pub appendix: bool,
}

/// A pipe table. Every row has exactly `header.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableBlock {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// A fenced code block. Lines are stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Info string after the opening fence. Not used for rendering.
    pub language: Option<String>,
    pub lines: Vec<String>,
}

impl CodeBlock {
    /// The block content with lines joined by `\n`.
    pub fn raw_text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub path: String,
    pub alt: String,
}
