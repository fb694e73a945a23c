use mdsplice_core::assemble::{AssembleOptions, Assembler, MemoryResolver};
use mdsplice_core::ir::nodes::{Alignment, BodyNode, Document, ParagraphContent, RawXml};
use mdsplice_core::markup::{parse_blocks_with_options, ParseOptions};
use mdsplice_core::RenderStyle;

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes
}

fn template() -> Document {
    Document::new(vec![BodyNode::SectionProperties(RawXml("<w:sectPr/>".into()))])
}

#[test]
fn test_missing_image_becomes_placeholder() {
    let mut resolver = MemoryResolver::new();
    resolver.insert("found.png", png(200, 100));

    let blocks = parse_blocks_with_options(
        &["![a](found.png)", "![b](missing.png)"],
        &ParseOptions::default(),
    );
    let mut doc = template();
    let report = Assembler::new(&resolver)
        .assemble(&blocks, &mut doc)
        .expect("missing images are not fatal");

    assert_eq!(report.nodes_inserted, 2);
    assert_eq!(report.missing_resources, vec!["missing.png".to_string()]);

    let picture = doc.nodes[0].as_paragraph().unwrap();
    let image = picture.images().next().expect("picture paragraph");
    assert_eq!(image.width_emu, 2 * image.height_emu);
    assert_eq!(picture.props.alignment, Some(Alignment::Center));

    let placeholder = doc.nodes[1].as_paragraph().unwrap();
    assert_eq!(placeholder.text(), "[Figure: missing.png]");
    assert!(placeholder
        .content
        .iter()
        .all(|c| !matches!(c, ParagraphContent::Image(_))));
}

#[test]
fn test_custom_appendix_markers_and_style() {
    let parse = ParseOptions {
        appendix_markers: vec!["annex".to_string()],
        ..ParseOptions::default()
    };
    let blocks = parse_blocks_with_options(&["# Annex B", "![x](x.png)"], &parse);

    let options = AssembleOptions {
        style: RenderStyle {
            placeholder_label: "Image".to_string(),
            ..RenderStyle::default()
        },
        ..AssembleOptions::default()
    };
    let resolver = MemoryResolver::new();
    let mut doc = template();
    let report = Assembler::with_options(&resolver, options)
        .assemble(&blocks, &mut doc)
        .unwrap();

    assert_eq!(report.appendix_started_at, Some(0));
    assert!(report.final_state.appendix_mode);
    assert_eq!(doc.nodes[1].as_paragraph().unwrap().text(), "[Image: x.png]");
}

#[test]
fn test_report_counts_blocks_and_nodes() {
    let blocks = parse_blocks_with_options(&["a", "", "---", "b"], &ParseOptions::default());
    let resolver = MemoryResolver::new();
    let mut doc = template();
    let report = Assembler::new(&resolver).assemble(&blocks, &mut doc).unwrap();

    assert_eq!(report.blocks, 4);
    assert_eq!(report.nodes_inserted, 2);
    assert!(report.missing_resources.is_empty());
    assert_eq!(report.appendix_started_at, None);
}
