//! Headings and textual paragraphs (plain, bullet, numbered).

use super::style::{cm_to_twips, pt_to_half_points, RenderStyle};
use crate::ir::nodes::{Paragraph, ParagraphProps, RunProps, TextRun};
use crate::markup::{tokenize, Heading, InlineStyle, Run};
use once_cell::sync::Lazy;
use regex::Regex;

// "1. Intro", "4.2 Details", "4.2.1. Notes"; a bare number without a dot ("2024 results") is
// part of the title.
static OUTLINE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+(?:\.\d+)*\.|\d+(?:\.\d+)+)\s+").unwrap());

/// Remove a numeric outline prefix from heading text.
pub fn strip_outline_prefix(text: &str) -> &str {
    match OUTLINE_PREFIX.find(text) {
        Some(prefix) => &text[prefix.end()..],
        None => text,
    }
}

/// A heading is one bold run in the heading style for its level. Inline markup is not applied.
pub fn heading_paragraph(heading: &Heading, style: &RenderStyle) -> Paragraph {
    let heading_style = style.heading(heading.level);
    let props = ParagraphProps {
        style_id: Some(heading_style.style_id.clone()),
        outline_level: Some(heading.level.as_u8() - 1),
        ..ParagraphProps::default()
    };
    let run = TextRun::new(
        strip_outline_prefix(&heading.text),
        RunProps {
            font: Some(style.body_font.family.clone()),
            size_half_points: Some(pt_to_half_points(heading_style.size_pt)),
            bold: true,
            italic: heading_style.italic,
        },
    );
    Paragraph::with_runs(props, vec![run])
}

/// A body paragraph; runs come from the inline tokenizer.
pub fn body_paragraph(text: &str, style: &RenderStyle) -> Paragraph {
    let props = ParagraphProps {
        style_id: Some(style.body_style_id.clone()),
        alignment: Some(style.body_alignment),
        ..ParagraphProps::default()
    };
    Paragraph::with_runs(props, styled_runs(text, style))
}

/// A bullet or numbered item: like a body paragraph, in the list style with a left indent.
pub fn list_paragraph(text: &str, style: &RenderStyle) -> Paragraph {
    let props = ParagraphProps {
        style_id: Some(style.list_style_id.clone()),
        alignment: Some(style.body_alignment),
        indent_left_twips: Some(cm_to_twips(style.list_indent_cm)),
        ..ParagraphProps::default()
    };
    Paragraph::with_runs(props, styled_runs(text, style))
}

fn styled_runs(text: &str, style: &RenderStyle) -> Vec<TextRun> {
    tokenize(text)
        .into_iter()
        .map(|run| render_run(run, style))
        .collect()
}

fn render_run(run: Run, style: &RenderStyle) -> TextRun {
    let mut props = style.body_font.run_props();
    match run.style {
        InlineStyle::Plain => {}
        InlineStyle::Strong => props.bold = true,
        InlineStyle::Emphasis => props.italic = true,
        InlineStyle::Monospace => {
            props.font = Some(style.code_font.family.clone());
            props.size_half_points = Some(pt_to_half_points(style.inline_code_size_pt));
        }
    }
    TextRun::new(run.content, props)
}
