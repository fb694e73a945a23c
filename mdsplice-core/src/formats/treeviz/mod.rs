//! Treeviz outlines
//!
//! A visual, line based outline of a document body or of a parsed block sequence, for inspecting
//! what the parser saw and what the assembler produced.
//!
//! Each line is `<prefix><connector> <icon> <label>`, labels truncated to 30 characters:
//!
//!   ⧉ Document (4 nodes, 1 section properties)
//!   ├─ ⋯ <w:p><w:r><w:t>Title page</w:t…
//!   ├─ § Heading1: Introduction
//!   ├─ ⊞ Table 3×2
//!   │ ├─ ☰ Processes | Time, s
//!   │ └─ ☰ 1 | 12.4
//!   └─ ⌘ sectPr
//!
//! Parameters:
//!     - `show-runs`: `"true"` lists the runs of every generated paragraph.
//!     - `show-template`: `"false"` hides template nodes.
//!     - `code-font`: runs in this font family are listed as monospace. Defaults to the
//!       built-in code font.

use super::icons::get_icon;
use crate::assemble::RenderStyle;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{BodyNode, Document, Paragraph, ParagraphContent, Table, TextRun};
use crate::markup::Block;
use std::collections::HashMap;

const LABEL_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree outline of a document body"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_params(doc, options))
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Outline of a document body. See the module docs for parameters.
pub fn to_treeviz_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let show_runs = flag(params, "show-runs", false);
    let show_template = flag(params, "show-template", true);
    let code_font = params
        .get("code-font")
        .cloned()
        .unwrap_or_else(|| RenderStyle::default().code_font.family);
    let runs = show_runs.then_some(code_font.as_str());

    let mut output = format!(
        "{} Document ({} nodes, {} section properties)\n",
        get_icon("Document"),
        doc.nodes.len(),
        doc.marker_count()
    );

    let visible: Vec<&BodyNode> = doc
        .nodes
        .iter()
        .filter(|n| show_template || !matches!(n, BodyNode::Template(_)))
        .collect();
    for (i, node) in visible.iter().enumerate() {
        let is_last = i == visible.len() - 1;
        format_body_node(&mut output, node, is_last, runs);
    }
    output
}

/// Outline of a parsed block sequence.
pub fn blocks_to_treeviz_str(blocks: &[Block]) -> String {
    let mut output = format!("{} Blocks ({})\n", get_icon("Document"), blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        let connector = connector(i == blocks.len() - 1);
        let (icon, label) = block_label(block);
        output.push_str(&format!("{connector} {icon} {}\n", truncate(&label)));
    }
    output
}

/// `runs` carries the code font family when runs are listed.
fn format_body_node(output: &mut String, node: &BodyNode, is_last: bool, runs: Option<&str>) {
    let connector = connector(is_last);
    let child_prefix = if is_last { "  " } else { "│ " };

    match node {
        BodyNode::Template(raw) => {
            let label = raw.as_str().trim();
            output.push_str(&format!(
                "{connector} {} {}\n",
                get_icon("Template"),
                truncate(label)
            ));
        }
        BodyNode::SectionProperties(_) => {
            output.push_str(&format!(
                "{connector} {} sectPr\n",
                get_icon("SectionProperties")
            ));
        }
        BodyNode::Paragraph(p) => {
            let (icon, label) = paragraph_label(p);
            output.push_str(&format!("{connector} {icon} {}\n", truncate(&label)));
            if let Some(code_font) = runs {
                format_paragraph_content(output, p, child_prefix, code_font);
            }
        }
        BodyNode::Table(t) => {
            output.push_str(&format!(
                "{connector} {} Table {}×{}\n",
                get_icon("Table"),
                t.rows.len(),
                t.column_count()
            ));
            format_table_rows(output, t, child_prefix);
        }
    }
}

fn format_paragraph_content(output: &mut String, p: &Paragraph, prefix: &str, code_font: &str) {
    for (i, item) in p.content.iter().enumerate() {
        let connector = connector(i == p.content.len() - 1);
        let (icon, label) = match item {
            ParagraphContent::Run(run) => {
                // Quoted so leading and trailing spaces stay visible.
                (get_icon(run_kind(run, code_font)), format!("{:?}", run.text))
            }
            ParagraphContent::Image(image) => (get_icon("Image"), image.name.clone()),
            ParagraphContent::PageBreak => (get_icon("PageBreak"), "page break".to_string()),
        };
        output.push_str(&format!("{prefix}{connector} {icon} {}\n", truncate(&label)));
    }
}

fn run_kind(run: &TextRun, code_font: &str) -> &'static str {
    if run.props.font.as_deref() == Some(code_font) {
        return "Monospace";
    }
    match (run.props.bold, run.props.italic) {
        (true, _) => "Strong",
        (_, true) => "Emphasis",
        _ => "Text",
    }
}

fn format_table_rows(output: &mut String, t: &Table, prefix: &str) {
    for (i, row) in t.rows.iter().enumerate() {
        let connector = connector(i == t.rows.len() - 1);
        let cells: Vec<String> = row.cells.iter().map(|c| c.text()).collect();
        output.push_str(&format!(
            "{prefix}{connector} {} {}\n",
            get_icon("TableRow"),
            truncate(&cells.join(" | "))
        ));
    }
}

fn paragraph_label(p: &Paragraph) -> (&'static str, String) {
    if let Some(image) = p.images().next() {
        return (get_icon("Image"), image.name.clone());
    }
    if p.content.iter().any(|c| matches!(c, ParagraphContent::PageBreak)) {
        return (get_icon("PageBreak"), "page break".to_string());
    }
    let text = p.text();
    match (&p.props.style_id, p.props.outline_level) {
        (Some(style), Some(_)) => (get_icon("Heading"), format!("{style}: {text}")),
        (Some(style), None) => (get_icon("Paragraph"), format!("{style}: {text}")),
        (None, _) => (get_icon("Paragraph"), text),
    }
}

fn block_label(block: &Block) -> (&'static str, String) {
    match block {
        Block::Heading(h) => {
            let suffix = if h.appendix { " (appendix)" } else { "" };
            (
                get_icon("Heading"),
                format!("H{} {}{suffix}", h.level.as_u8(), h.text),
            )
        }
        Block::Paragraph { text } => (get_icon("Paragraph"), text.clone()),
        Block::Bullet { text } => (get_icon("Bullet"), text.clone()),
        Block::Numbered { text } => (get_icon("Numbered"), text.clone()),
        Block::Table(t) => (
            get_icon("Table"),
            format!("Table {}×{}", t.rows.len() + 1, t.column_count()),
        ),
        Block::Code(c) => {
            let language = c.language.as_deref().unwrap_or("plain");
            (
                get_icon("Code"),
                format!("Code {language} ({} lines)", c.lines.len()),
            )
        }
        Block::Image(image) => (get_icon("Image"), image.path.clone()),
        Block::HorizontalRule => (get_icon("HorizontalRule"), "Rule".to_string()),
        Block::Blank => (get_icon("Blank"), "Blank".to_string()),
    }
}

fn connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

fn flag(params: &HashMap<String, String>, key: &str, default: bool) -> bool {
    params
        .get(key)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn truncate(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        label.to_string()
    } else {
        let head: String = label.chars().take(LABEL_WIDTH).collect();
        format!("{head}…")
    }
}
