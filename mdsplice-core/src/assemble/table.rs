//! Table builder: a bold, centered header row followed by centered data rows.

use super::style::{pt_to_half_points, RenderStyle};
use crate::ir::nodes::{
    Alignment, Paragraph, ParagraphProps, RunProps, Table, TableCell, TableRow, TextRun,
};
use crate::markup::TableBlock;

/// Every row gets at least one cell; a table row without cells is not valid WordprocessingML.
pub fn build_table(block: &TableBlock, style: &RenderStyle) -> Table {
    let columns = block.column_count().max(1);
    let mut rows = Vec::with_capacity(block.rows.len() + 1);
    rows.push(build_row(&block.header, columns, true, style));
    for row in &block.rows {
        rows.push(build_row(row, columns, false, style));
    }
    Table {
        style_id: Some(style.table_style_id.clone()),
        rows,
    }
}

fn build_row(cells: &[String], columns: usize, header: bool, style: &RenderStyle) -> TableRow {
    let cells = (0..columns)
        .map(|i| {
            let text = cells.get(i).map(String::as_str).unwrap_or_default();
            build_cell(text, header, style)
        })
        .collect();
    TableRow { header, cells }
}

fn build_cell(text: &str, bold: bool, style: &RenderStyle) -> TableCell {
    let props = ParagraphProps {
        alignment: Some(Alignment::Center),
        ..ParagraphProps::default()
    };
    let text = text.trim();
    let paragraph = if text.is_empty() {
        Paragraph::new(props)
    } else {
        let run = TextRun::new(
            text,
            RunProps {
                font: Some(style.body_font.family.clone()),
                size_half_points: Some(pt_to_half_points(style.table_font_size_pt)),
                bold,
                italic: false,
            },
        );
        Paragraph::with_runs(props, vec![run])
    };
    TableCell {
        paragraphs: vec![paragraph],
    }
}
