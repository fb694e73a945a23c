//! Property tests: parsing and assembly accept any input.

use mdsplice_core::assemble::{assemble, NoResources};
use mdsplice_core::ir::nodes::{BodyNode, Document, RawXml};
use mdsplice_core::markup::{parse_blocks, tokenize};
use proptest::prelude::*;

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("---".to_string()),
        Just("```".to_string()),
        Just("| a | b |".to_string()),
        Just("|---|---|".to_string()),
        Just("![x](y.png)".to_string()),
        "[#*`|!\\-: a-z0-9.]{0,24}",
        "\\PC{0,16}",
    ]
}

proptest! {
    #[test]
    fn parse_and_assemble_never_fail(lines in prop::collection::vec(line(), 0..24)) {
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        let blocks = parse_blocks(&lines);

        let mut doc = Document::new(vec![BodyNode::SectionProperties(RawXml("<w:sectPr/>".into()))]);
        let report = assemble(&blocks, &mut doc, &NoResources).unwrap();

        prop_assert_eq!(doc.marker_count(), 1);
        prop_assert!(doc.marker_is_last());
        prop_assert_eq!(doc.nodes.len(), report.nodes_inserted + 1);
    }

    #[test]
    fn tokenize_preserves_unmarked_text(text in "[a-z ]{0,40}") {
        let runs = tokenize(&text);
        let joined: String = runs.iter().map(|r| r.content.as_str()).collect();
        prop_assert_eq!(joined, text);
    }
}
