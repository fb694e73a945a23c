//! Code renderer: one indented, fixed-width paragraph per source line.

use super::style::{cm_to_twips, RenderStyle};
use crate::ir::nodes::{Paragraph, ParagraphProps, TextRun};
use crate::markup::CodeBlock;

/// Text used for empty code lines so they keep their height.
pub const EMPTY_LINE: &str = " ";

pub fn code_paragraphs(code: &CodeBlock, style: &RenderStyle) -> Vec<Paragraph> {
    let props = ParagraphProps {
        indent_left_twips: Some(cm_to_twips(style.code_indent_cm)),
        ..ParagraphProps::default()
    };
    code.lines
        .iter()
        .map(|line| {
            let text = if line.is_empty() { EMPTY_LINE } else { line };
            Paragraph::with_runs(
                props.clone(),
                vec![TextRun::new(text, style.code_font.run_props())],
            )
        })
        .collect()
}
