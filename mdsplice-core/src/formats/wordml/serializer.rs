//! WordprocessingML writer.
//!
//! Template nodes are written back verbatim. Generated paragraphs and tables are written with the
//! `w:` prefix, which the parser guarantees is bound in the template. Pictures declare the
//! DrawingML namespaces they use on the elements themselves.

use super::media::MediaNumbering;
use crate::ir::nodes::{
    Alignment, BodyNode, Document, ImageData, Paragraph, ParagraphContent, ParagraphProps,
    RunProps, Table, TableRow, TextRun,
};

const WP_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const PIC_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Drawing object ids start high to stay clear of ids already used by the template.
const DOC_PR_ID_BASE: usize = 4000;

pub fn serialize_document(doc: &Document) -> String {
    let mut out = String::with_capacity(doc.prolog.len() + doc.epilog.len() + 256 * doc.nodes.len());
    let mut media = MediaNumbering::default();

    out.push_str(&doc.prolog);
    for node in &doc.nodes {
        match node {
            BodyNode::Template(raw) | BodyNode::SectionProperties(raw) => out.push_str(raw.as_str()),
            BodyNode::Paragraph(p) => write_paragraph(&mut out, p, &mut media),
            BodyNode::Table(t) => write_table(&mut out, t, &mut media),
        }
    }
    out.push_str(&doc.epilog);
    out
}

fn write_paragraph(out: &mut String, p: &Paragraph, media: &mut MediaNumbering) {
    if p.content.is_empty() && p.props == ParagraphProps::default() {
        out.push_str("<w:p/>");
        return;
    }
    out.push_str("<w:p>");
    write_paragraph_props(out, &p.props);
    for item in &p.content {
        match item {
            ParagraphContent::Run(run) => write_run(out, run),
            ParagraphContent::Image(image) => write_drawing(out, image, media),
            ParagraphContent::PageBreak => out.push_str(r#"<w:r><w:br w:type="page"/></w:r>"#),
        }
    }
    out.push_str("</w:p>");
}

// Children follow the schema sequence: pStyle, ind, jc, outlineLvl.
fn write_paragraph_props(out: &mut String, props: &ParagraphProps) {
    if *props == ParagraphProps::default() {
        return;
    }
    out.push_str("<w:pPr>");
    if let Some(style) = &props.style_id {
        out.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape_xml(style)));
    }
    if let Some(left) = props.indent_left_twips {
        out.push_str(&format!(r#"<w:ind w:left="{left}"/>"#));
    }
    if let Some(alignment) = props.alignment {
        out.push_str(&format!(r#"<w:jc w:val="{}"/>"#, jc_value(alignment)));
    }
    if let Some(level) = props.outline_level {
        out.push_str(&format!(r#"<w:outlineLvl w:val="{level}"/>"#));
    }
    out.push_str("</w:pPr>");
}

fn jc_value(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

fn write_run(out: &mut String, run: &TextRun) {
    out.push_str("<w:r>");
    write_run_props(out, &run.props);
    out.push_str(&format!(
        r#"<w:t xml:space="preserve">{}</w:t>"#,
        escape_xml(&run.text)
    ));
    out.push_str("</w:r>");
}

// Children follow the schema sequence: rFonts, b, i, sz, szCs.
fn write_run_props(out: &mut String, props: &RunProps) {
    if *props == RunProps::default() {
        return;
    }
    out.push_str("<w:rPr>");
    if let Some(font) = &props.font {
        let font = escape_xml(font);
        out.push_str(&format!(
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
        ));
    }
    if props.bold {
        out.push_str("<w:b/>");
    }
    if props.italic {
        out.push_str("<w:i/>");
    }
    if let Some(size) = props.size_half_points {
        out.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
    }
    out.push_str("</w:rPr>");
}

fn write_drawing(out: &mut String, image: &ImageData, media: &mut MediaNumbering) {
    let (index, rel_id) = media.next();
    let doc_pr_id = DOC_PR_ID_BASE + index;
    let name = escape_xml(&image.name);
    let (cx, cy) = (image.width_emu, image.height_emu);

    out.push_str(&format!(
        concat!(
            r#"<w:r><w:drawing>"#,
            r#"<wp:inline distT="0" distB="0" distL="0" distR="0" xmlns:wp="{wp}">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:docPr id="{doc_pr_id}" name="Picture {index}" descr="{name}"/>"#,
            r#"<a:graphic xmlns:a="{a}"><a:graphicData uri="{pic}">"#,
            r#"<pic:pic xmlns:pic="{pic}">"#,
            r#"<pic:nvPicPr><pic:cNvPr id="{index}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel_id}" xmlns:r="{r}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
        ),
        wp = WP_NS,
        a = A_NS,
        pic = PIC_NS,
        r = R_NS,
        cx = cx,
        cy = cy,
        doc_pr_id = doc_pr_id,
        index = index,
        name = name,
        rel_id = rel_id,
    ));
}

fn write_table(out: &mut String, table: &Table, media: &mut MediaNumbering) {
    out.push_str("<w:tbl><w:tblPr>");
    if let Some(style) = &table.style_id {
        out.push_str(&format!(r#"<w:tblStyle w:val="{}"/>"#, escape_xml(style)));
    }
    out.push_str(r#"<w:tblW w:w="0" w:type="auto"/></w:tblPr><w:tblGrid>"#);
    for _ in 0..table.column_count() {
        out.push_str("<w:gridCol/>");
    }
    out.push_str("</w:tblGrid>");
    for row in &table.rows {
        write_row(out, row, media);
    }
    out.push_str("</w:tbl>");
}

fn write_row(out: &mut String, row: &TableRow, media: &mut MediaNumbering) {
    out.push_str("<w:tr>");
    if row.header {
        out.push_str("<w:trPr><w:tblHeader/></w:trPr>");
    }
    for cell in &row.cells {
        out.push_str(r#"<w:tc><w:tcPr><w:tcW w:w="0" w:type="auto"/></w:tcPr>"#);
        if cell.paragraphs.is_empty() {
            // A cell must end with a paragraph.
            out.push_str("<w:p/>");
        }
        for p in &cell.paragraphs {
            write_paragraph(out, p, media);
        }
        out.push_str("</w:tc>");
    }
    out.push_str("</w:tr>");
}

/// Escape text for element content and attribute values. Characters outside the XML 1.0 `Char`
/// production are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars().filter(|c| is_xml_char(*c)) {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

// Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
// Surrogates cannot occur in a `char`.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
