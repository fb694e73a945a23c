use mdsplice_core::assemble::{assemble, Assembler, NoResources};
use mdsplice_core::ir::nodes::{BodyNode, Document, RawXml};
use mdsplice_core::markup::{parse_blocks, tokenize, Block, HeadingLevel, InlineStyle};
use mdsplice_core::AssemblyError;

fn template() -> Document {
    Document::new(vec![
        BodyNode::Template(RawXml("<w:p><w:r><w:t>Cover</w:t></w:r></w:p>".into())),
        BodyNode::SectionProperties(RawXml("<w:sectPr/>".into())),
    ])
}

fn generated_texts(doc: &Document) -> Vec<String> {
    doc.generated()
        .map(|node| match node {
            BodyNode::Paragraph(p) => p.text(),
            BodyNode::Table(_) => "<table>".to_string(),
            _ => unreachable!(),
        })
        .collect()
}

#[test]
fn test_heading_then_paragraph() {
    let blocks = parse_blocks(&["## 1. Intro", "Hello **world**."]);
    match &blocks[0] {
        Block::Heading(h) => {
            assert_eq!(h.level, HeadingLevel::Two);
            assert_eq!(h.text, "1. Intro");
        }
        other => panic!("Expected heading, got {other:?}"),
    }

    let mut doc = template();
    assemble(&blocks, &mut doc, &NoResources).expect("assembly should succeed");

    assert_eq!(doc.nodes.len(), 4);
    assert!(doc.marker_is_last());
    let heading = doc.nodes[1].as_paragraph().unwrap();
    assert_eq!(heading.text(), "Intro");
    let body = doc.nodes[2].as_paragraph().unwrap();
    let runs: Vec<_> = body.runs().map(|r| (r.text.as_str(), r.props.bold)).collect();
    assert_eq!(runs, vec![("Hello ", false), ("world", true), (".", false)]);
}

#[test]
fn test_nodes_follow_block_order() {
    let blocks = parse_blocks(&[
        "# Title",
        "first",
        "| a | b |",
        "|---|---|",
        "| 1 | 2 |",
        "- item",
        "2. step",
        "last",
    ]);
    let mut doc = template();
    assemble(&blocks, &mut doc, &NoResources).unwrap();

    assert_eq!(
        generated_texts(&doc),
        vec!["Title", "first", "<table>", "item", "step", "last"]
    );
    assert!(matches!(doc.nodes[0], BodyNode::Template(_)));
    assert_eq!(doc.marker_count(), 1);
    assert!(doc.marker_is_last());
}

#[test]
fn test_code_block_yields_one_paragraph_per_line() {
    let blocks = parse_blocks(&["```python", "print(1)", "", "print(2)", "```"]);
    let mut doc = template();
    let report = assemble(&blocks, &mut doc, &NoResources).unwrap();

    assert_eq!(report.nodes_inserted, 3);
    assert_eq!(generated_texts(&doc), vec!["print(1)", " ", "print(2)"]);
}

#[test]
fn test_content_after_marker_stays_after_it() {
    let mut doc = Document::new(vec![
        BodyNode::SectionProperties(RawXml("<w:sectPr/>".into())),
        BodyNode::Template(RawXml("<w:p/>".into())),
    ]);
    assemble(&parse_blocks(&["text"]), &mut doc, &NoResources).unwrap();

    assert!(doc.nodes[0].as_paragraph().is_some());
    assert!(doc.nodes[1].is_marker());
    assert!(matches!(doc.nodes[2], BodyNode::Template(_)));
}

#[test]
fn test_two_markers_are_rejected_before_any_change() {
    let mut doc = template();
    doc.nodes
        .push(BodyNode::SectionProperties(RawXml("<w:sectPr/>".into())));
    let before = doc.clone();

    let err = Assembler::new(&NoResources)
        .assemble(&parse_blocks(&["text"]), &mut doc)
        .unwrap_err();

    assert_eq!(err, AssemblyError::StructuralPrecondition { found: 2 });
    assert_eq!(doc, before);
}

#[test]
fn test_assembly_is_additive() {
    let blocks = parse_blocks(&["once"]);
    let mut doc = template();
    assemble(&blocks, &mut doc, &NoResources).unwrap();
    assemble(&blocks, &mut doc, &NoResources).unwrap();

    assert_eq!(generated_texts(&doc), vec!["once", "once"]);
    assert!(doc.marker_is_last());
}

#[test]
fn test_unmatched_marker_stays_literal() {
    let runs = tokenize("a * b");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].content, "a * b");
    assert_eq!(runs[0].style, InlineStyle::Plain);

    let mut doc = template();
    assemble(&parse_blocks(&["a * b"]), &mut doc, &NoResources).unwrap();
    assert_eq!(doc.nodes[1].as_paragraph().unwrap().text(), "a * b");
}
