use mdsplice_core::assemble::{AssembleOptions, Assembler, NoResources};
use mdsplice_core::ir::nodes::{BodyNode, Document, RawXml};
use mdsplice_core::markup::{parse_source_with_options, ParseOptions};

const SOURCE: &str = "# Quarterly report\n\
[1. Scope](#scope)\n\
[2. Costs](#costs)\n\
\n\
## 1. Scope\n\
$$ E = mc^2 $$\n\
Plain text.\n\
[1. Scope](#scope)\n\
See [the site](https://example.org).\n";

fn template() -> Document {
    Document::new(vec![BodyNode::SectionProperties(RawXml("<w:sectPr/>".into()))])
}

fn render(parse: &ParseOptions, options: AssembleOptions) -> (Vec<String>, usize) {
    let blocks = parse_source_with_options(SOURCE, parse);
    let mut doc = template();
    let report = Assembler::with_options(&NoResources, options)
        .assemble(&blocks, &mut doc)
        .unwrap();
    let texts = doc
        .nodes
        .iter()
        .filter_map(|node| node.as_paragraph())
        .map(|p| p.text())
        .collect();
    (texts, report.skipped_blocks)
}

#[test]
fn test_nothing_is_skipped_by_default() {
    let (texts, skipped) = render(&ParseOptions::default(), AssembleOptions::default());
    assert_eq!(skipped, 0);
    assert_eq!(texts.len(), 8);
    assert!(texts.iter().any(|t| t.contains("E = mc^2")));
}

#[test]
fn test_title_heading_is_skipped() {
    let options = AssembleOptions {
        skip_title_heading: true,
        ..AssembleOptions::default()
    };
    let (texts, skipped) = render(&ParseOptions::default(), options);
    assert_eq!(skipped, 1);
    assert!(texts.iter().all(|t| !t.contains("Quarterly report")));
    assert!(texts.iter().any(|t| t.contains("Scope")));
}

#[test]
fn test_math_lines_are_skipped() {
    let options = AssembleOptions {
        skip_math_lines: true,
        ..AssembleOptions::default()
    };
    let (texts, skipped) = render(&ParseOptions::default(), options);
    assert_eq!(skipped, 1);
    assert!(texts.iter().all(|t| !t.contains("mc^2")));
}

#[test]
fn test_anchor_link_lines_are_skipped() {
    let options = AssembleOptions {
        skip_anchor_links: true,
        ..AssembleOptions::default()
    };
    let (texts, skipped) = render(&ParseOptions::default(), options);
    assert_eq!(skipped, 3);
    assert!(texts.iter().any(|t| t.contains("the site")));
}

#[test]
fn test_front_matter_and_skip_rules_combine() {
    let parse = ParseOptions {
        skip_front_matter: true,
        ..ParseOptions::default()
    };
    let options = AssembleOptions {
        skip_title_heading: true,
        skip_math_lines: true,
        skip_anchor_links: true,
        ..AssembleOptions::default()
    };
    let (texts, skipped) = render(&parse, options);
    assert_eq!(skipped, 2);
    assert_eq!(texts.len(), 3);
    assert!(texts[0].contains("Scope"));
    assert_eq!(texts[1], "Plain text.");
}
