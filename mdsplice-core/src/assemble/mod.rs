//! Document assembler
//!
//!     Drives the block renderers and splices their output into a template document. Every
//!     generated node is inserted immediately before the section properties marker through an
//!     [`InsertionCursor`], so the emitted order is the block order and the marker stays the
//!     closing node of the body.
//!
//!     Block to node mapping:
//!
//!     | Block                | Nodes                                                  |
//!     |----------------------|--------------------------------------------------------|
//!     | Heading              | one heading paragraph (single bold run, no inline markup) |
//!     | Paragraph            | one body paragraph, runs from the inline tokenizer     |
//!     | Bullet / Numbered    | one indented list paragraph                            |
//!     | Table                | one table                                              |
//!     | Code                 | one fixed-width paragraph per source line              |
//!     | Image                | picture paragraph, or an italic placeholder            |
//!     | HorizontalRule/Blank | nothing                                                |
//!
//!     The only fatal error is a target without exactly one marker, detected before anything is
//!     inserted. Missing images degrade to placeholders and are listed in the [`AssemblyReport`].
//!
//!     Assembly is additive: running it twice over the same document inserts everything twice.
//!
//!     Opt-in skip rules (all off by default) drop level one headings, paragraphs holding a `$`
//!     formula, and paragraphs that are a single `[text](#anchor)` link. Skipped blocks render
//!     nothing and are counted in the report.

pub mod code;
pub mod media;
pub mod style;
pub mod table;
pub mod text;

use crate::error::AssemblyError;
use crate::ir::nodes::{BodyNode, Document, Paragraph, ParagraphContent, ParagraphProps};
use crate::ir::InsertionCursor;
use crate::markup::{Block, HeadingLevel};
use once_cell::sync::Lazy;
use regex::Regex;
pub use media::{FsResolver, MemoryResolver, NoResources, ResourceResolver};
pub use style::RenderStyle;

/// Options for an assembly run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssembleOptions {
    pub style: RenderStyle,
    /// Insert a page break paragraph before the first generated node.
    pub page_break_before: bool,
    /// Insert an empty paragraph after every table.
    pub spacer_after_table: bool,
    /// Drop level one headings; the title usually lives on the template's cover page.
    pub skip_title_heading: bool,
    /// Drop paragraphs that start with `$` or `$$` (TeX formulas).
    pub skip_math_lines: bool,
    /// Drop paragraphs that consist of one in-document link, as in a table of contents.
    pub skip_anchor_links: bool,
}

static ANCHOR_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[.+\]\(#.+\)$").unwrap());

impl AssembleOptions {
    /// Whether a skip rule drops `block`.
    pub fn skips(&self, block: &Block) -> bool {
        match block {
            Block::Heading(heading) => {
                self.skip_title_heading && heading.level == HeadingLevel::One
            }
            Block::Paragraph { text } => {
                let text = text.trim();
                (self.skip_math_lines && text.starts_with('$'))
                    || (self.skip_anchor_links && ANCHOR_LINK.is_match(text))
            }
            _ => false,
        }
    }
}

/// State carried from one block to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblyState {
    /// Set once an appendix heading has been rendered. Rendering does not depend on it yet.
    pub appendix_mode: bool,
    /// The previous block was a blank line.
    pub after_blank: bool,
    /// The previous block was a horizontal rule.
    pub after_rule: bool,
}

impl AssemblyState {
    /// The state after `block` has been rendered.
    pub fn advance(self, block: &Block) -> Self {
        let appendix_mode = match block {
            Block::Heading(heading) => self.appendix_mode || heading.appendix,
            _ => self.appendix_mode,
        };
        AssemblyState {
            appendix_mode,
            after_blank: matches!(block, Block::Blank),
            after_rule: matches!(block, Block::HorizontalRule),
        }
    }
}

/// Summary of an assembly run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyReport {
    pub blocks: usize,
    pub nodes_inserted: usize,
    /// Blocks dropped by a skip rule.
    pub skipped_blocks: usize,
    /// Image paths that were replaced by placeholders, in block order.
    pub missing_resources: Vec<String>,
    /// Index of the block that switched on appendix mode.
    pub appendix_started_at: Option<usize>,
    pub final_state: AssemblyState,
}

pub struct Assembler<'r> {
    options: AssembleOptions,
    resolver: &'r dyn ResourceResolver,
}

impl<'r> Assembler<'r> {
    pub fn new(resolver: &'r dyn ResourceResolver) -> Self {
        Self::with_options(resolver, AssembleOptions::default())
    }

    pub fn with_options(resolver: &'r dyn ResourceResolver, options: AssembleOptions) -> Self {
        Self { options, resolver }
    }

    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Render `blocks` into `doc` before its section properties marker.
    pub fn assemble(
        &self,
        blocks: &[Block],
        doc: &mut Document,
    ) -> Result<AssemblyReport, AssemblyError> {
        let mut cursor = InsertionCursor::new(doc)?;
        let mut report = AssemblyReport {
            blocks: blocks.len(),
            ..AssemblyReport::default()
        };

        if self.options.page_break_before {
            cursor.insert(BodyNode::Paragraph(page_break()));
        }

        let mut state = AssemblyState::default();
        for (index, block) in blocks.iter().enumerate() {
            if self.options.skips(block) {
                log::debug!("skipping {} block {index}", block.kind());
                report.skipped_blocks += 1;
            } else {
                for node in self.render_block(block, &mut report) {
                    cursor.insert(node);
                }
            }
            let next = state.advance(block);
            if next.appendix_mode && !state.appendix_mode {
                log::debug!("appendix starts at block {index}");
                report.appendix_started_at = Some(index);
            }
            state = next;
        }

        report.nodes_inserted = cursor.inserted();
        report.final_state = state;
        log::info!(
            "assembled {} blocks into {} nodes ({} skipped, {} missing resources)",
            report.blocks,
            report.nodes_inserted,
            report.skipped_blocks,
            report.missing_resources.len()
        );
        Ok(report)
    }

    fn render_block(&self, block: &Block, report: &mut AssemblyReport) -> Vec<BodyNode> {
        let style = &self.options.style;
        log::debug!("rendering {} block", block.kind());

        match block {
            Block::Heading(heading) => {
                vec![BodyNode::Paragraph(text::heading_paragraph(heading, style))]
            }
            Block::Paragraph { text } => {
                vec![BodyNode::Paragraph(text::body_paragraph(text, style))]
            }
            Block::Bullet { text } | Block::Numbered { text } => {
                vec![BodyNode::Paragraph(text::list_paragraph(text, style))]
            }
            Block::Table(table_block) => {
                let mut nodes = vec![BodyNode::Table(table::build_table(table_block, style))];
                if self.options.spacer_after_table {
                    nodes.push(BodyNode::Paragraph(Paragraph::default()));
                }
                nodes
            }
            Block::Code(code_block) => code::code_paragraphs(code_block, style)
                .into_iter()
                .map(BodyNode::Paragraph)
                .collect(),
            Block::Image(image) => {
                let paragraph = match media::resolve_image(image, self.resolver, style) {
                    Ok(data) => media::image_paragraph(data),
                    Err(missing) => {
                        log::warn!("{missing}; inserting a placeholder");
                        report.missing_resources.push(missing.path.clone());
                        media::placeholder_paragraph(&missing, style)
                    }
                };
                vec![BodyNode::Paragraph(paragraph)]
            }
            Block::HorizontalRule | Block::Blank => Vec::new(),
        }
    }
}

fn page_break() -> Paragraph {
    Paragraph {
        props: ParagraphProps::default(),
        content: vec![ParagraphContent::PageBreak],
    }
}

/// Render blocks into `doc` with default options.
pub fn assemble(
    blocks: &[Block],
    doc: &mut Document,
    resolver: &dyn ResourceResolver,
) -> Result<AssemblyReport, AssemblyError> {
    Assembler::new(resolver).assemble(blocks, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::RawXml;
    use crate::markup::{parse_blocks, Heading, HeadingLevel};

    fn template() -> Document {
        Document::new(vec![
            BodyNode::Template(RawXml("<w:p><w:r><w:t>Title page</w:t></w:r></w:p>".into())),
            BodyNode::SectionProperties(RawXml("<w:sectPr/>".into())),
        ])
    }

    #[test]
    fn appendix_state_turns_on_and_stays_on() {
        let plain = Block::Heading(Heading {
            level: HeadingLevel::Two,
            text: "Results".into(),
            appendix: false,
        });
        let appendix = Block::Heading(Heading {
            level: HeadingLevel::Two,
            text: "Appendix".into(),
            appendix: true,
        });
        let state = AssemblyState::default().advance(&plain);
        assert!(!state.appendix_mode);
        let state = state.advance(&appendix).advance(&Block::Blank).advance(&plain);
        assert!(state.appendix_mode);
    }

    #[test]
    fn state_remembers_blank_and_rule_for_one_block() {
        let state = AssemblyState::default().advance(&Block::Blank);
        assert!(state.after_blank && !state.after_rule);

        let state = state.advance(&Block::HorizontalRule);
        assert!(state.after_rule && !state.after_blank);

        let state = state.advance(&Block::Paragraph { text: "x".into() });
        assert!(!state.after_rule && !state.after_blank);
    }

    #[test]
    fn skip_rules_match_their_blocks_only() {
        let options = AssembleOptions {
            skip_title_heading: true,
            skip_math_lines: true,
            skip_anchor_links: true,
            ..AssembleOptions::default()
        };
        let skipped = parse_blocks(&["# Title", "$$ a^2 $$", "  $x$", "[1. Goal](#goal)"]);
        assert!(skipped.iter().all(|b| options.skips(b)));

        let kept = parse_blocks(&[
            "## Title",
            "costs $5",
            "[site](https://example.org)",
            "see [1. Goal](#goal) below",
        ]);
        assert!(kept.iter().all(|b| !options.skips(b)));
        assert!(skipped.iter().all(|b| !AssembleOptions::default().skips(b)));
    }

    #[test]
    fn report_records_where_the_appendix_starts() {
        let blocks = parse_blocks(&["## Results", "text", "## Appendix A", "```", "x"]);
        let mut doc = template();
        let report = assemble(&blocks, &mut doc, &NoResources).unwrap();
        assert_eq!(report.appendix_started_at, Some(2));
        assert!(report.final_state.appendix_mode);
    }

    #[test]
    fn rules_and_blanks_produce_nothing() {
        let blocks = parse_blocks(&["", "---", "   "]);
        let mut doc = template();
        let report = assemble(&blocks, &mut doc, &NoResources).unwrap();
        assert_eq!(report.nodes_inserted, 0);
        assert_eq!(doc, template());
    }

    #[test]
    fn page_break_comes_first() {
        let options = AssembleOptions {
            page_break_before: true,
            ..AssembleOptions::default()
        };
        let mut doc = template();
        Assembler::with_options(&NoResources, options)
            .assemble(&parse_blocks(&["text"]), &mut doc)
            .unwrap();
        let first = doc.nodes[1].as_paragraph().unwrap();
        assert_eq!(first.content, vec![ParagraphContent::PageBreak]);
        assert_eq!(doc.nodes[2].as_paragraph().unwrap().text(), "text");
    }

    #[test]
    fn spacer_follows_tables_when_enabled() {
        let options = AssembleOptions {
            spacer_after_table: true,
            ..AssembleOptions::default()
        };
        let mut doc = template();
        let report = Assembler::with_options(&NoResources, options)
            .assemble(&parse_blocks(&["| a |", "|---|", "| 1 |"]), &mut doc)
            .unwrap();
        assert_eq!(report.nodes_inserted, 2);
        assert!(doc.nodes[1].as_table().is_some());
        assert_eq!(doc.nodes[2].as_paragraph(), Some(&Paragraph::default()));
    }

    #[test]
    fn failed_precondition_leaves_document_untouched() {
        let mut doc = Document::new(vec![BodyNode::Template(RawXml("<w:p/>".into()))]);
        let before = doc.clone();
        let err = assemble(&parse_blocks(&["text"]), &mut doc, &NoResources).unwrap_err();
        assert_eq!(err, AssemblyError::StructuralPrecondition { found: 0 });
        assert_eq!(doc, before);
    }
}
