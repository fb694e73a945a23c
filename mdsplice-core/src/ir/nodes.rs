//! Core data structures of the target document.

/// Raw XML kept exactly as it appeared in the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawXml(pub String);

impl RawXml {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A template document body with the text surrounding it.
///
/// `prolog` holds everything up to and including the body start tag, `epilog` everything from the
/// body end tag onwards. Both are empty for documents built in memory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub prolog: String,
    pub nodes: Vec<BodyNode>,
    pub epilog: String,
}

impl Document {
    pub fn new(nodes: Vec<BodyNode>) -> Self {
        Self {
            prolog: String::new(),
            nodes,
            epilog: String::new(),
        }
    }

    /// Number of section properties markers in the body.
    pub fn marker_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_marker()).count()
    }

    /// Position of the first section properties marker.
    pub fn marker_index(&self) -> Option<usize> {
        self.nodes.iter().position(BodyNode::is_marker)
    }

    /// Whether the last body node is a section properties marker.
    pub fn marker_is_last(&self) -> bool {
        self.nodes.last().is_some_and(BodyNode::is_marker)
    }

    /// Paragraphs and tables produced by an assembler, in document order.
    pub fn generated(&self) -> impl Iterator<Item = &BodyNode> {
        self.nodes.iter().filter(|n| n.is_generated())
    }
}

/// A direct child of the document body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyNode {
    /// Template content, passed through untouched.
    Template(RawXml),
    Paragraph(Paragraph),
    Table(Table),
    /// The section properties node that closes the body.
    SectionProperties(RawXml),
}

impl BodyNode {
    pub fn is_marker(&self) -> bool {
        matches!(self, BodyNode::SectionProperties(_))
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, BodyNode::Paragraph(_) | BodyNode::Table(_))
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            BodyNode::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            BodyNode::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphProps {
    pub style_id: Option<String>,
    pub alignment: Option<Alignment>,
    pub indent_left_twips: Option<u32>,
    /// Zero-based outline level (heading 1 is level 0).
    pub outline_level: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub props: ParagraphProps,
    pub content: Vec<ParagraphContent>,
}

impl Paragraph {
    pub fn new(props: ParagraphProps) -> Self {
        Self {
            props,
            content: Vec::new(),
        }
    }

    pub fn with_runs(props: ParagraphProps, runs: Vec<TextRun>) -> Self {
        Self {
            props,
            content: runs.into_iter().map(ParagraphContent::Run).collect(),
        }
    }

    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(|c| match c {
            ParagraphContent::Run(run) => Some(run),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageData> {
        self.content.iter().filter_map(|c| match c {
            ParagraphContent::Image(image) => Some(image),
            _ => None,
        })
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphContent {
    Run(TextRun),
    Image(ImageData),
    PageBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunProps {
    pub font: Option<String>,
    pub size_half_points: Option<u32>,
    pub bold: bool,
    pub italic: bool,
}

/// A rendered run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub props: RunProps,
}

impl TextRun {
    pub fn new(text: impl Into<String>, props: RunProps) -> Self {
        Self {
            text: text.into(),
            props,
        }
    }
}

/// An embedded picture sized in EMUs (914400 per inch, 360000 per centimetre).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// File name used for the media part.
    pub name: String,
    pub bytes: Vec<u8>,
    pub width_emu: u64,
    pub height_emu: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub style_id: Option<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |row| row.cells.len())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub header: bool,
    pub cells: Vec<TableCell>,
}

/// A table cell. Always holds at least one paragraph once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
