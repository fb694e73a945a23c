use mdsplice_core::format::Format;
use mdsplice_core::formats::wordml::{relationships_xml, WordmlFormat, WML_NS};
use mdsplice_core::ir::nodes::BodyNode;
use mdsplice_core::{
    render_wordml, AssembleOptions, FsResolver, NoResources, ParseOptions, Rendered,
};
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures().join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn render_report(options: AssembleOptions) -> Rendered {
    render_wordml(
        &read_fixture("report.md"),
        &read_fixture("template.xml"),
        &FsResolver::new(fixtures()),
        &ParseOptions::default(),
        options,
    )
    .expect("fixture report should render")
}

/// Direct children of `w:body`, by local name.
fn body_children(xml: &str) -> Vec<String> {
    let doc = roxmltree::Document::parse(xml).expect("output must be well-formed XML");
    let body = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name((WML_NS, "body")))
        .expect("body");
    body.children()
        .filter(|n| n.is_element())
        .map(|n| n.tag_name().name().to_string())
        .collect()
}

#[test]
fn test_report_is_spliced_before_section_properties() {
    let rendered = render_report(AssembleOptions::default());
    let children = body_children(&rendered.xml);

    // Three cover paragraphs, fifteen generated nodes, the section properties.
    assert_eq!(children.len(), 3 + 15 + 1);
    assert_eq!(children.last().map(String::as_str), Some("sectPr"));
    assert_eq!(children.iter().filter(|c| *c == "sectPr").count(), 1);
    assert_eq!(children.iter().filter(|c| *c == "tbl").count(), 1);
    assert_eq!(rendered.report.nodes_inserted, 15);
}

#[test]
fn test_template_content_is_untouched() {
    let template = read_fixture("template.xml");
    let rendered = render_report(AssembleOptions::default());

    let cover_end = template.find("\n    <w:sectPr>").unwrap();
    assert!(rendered.xml.starts_with(&template[..cover_end]));
    let sect_pr = &template[cover_end..];
    assert!(rendered.xml.ends_with(sect_pr));
}

#[test]
fn test_images_and_placeholders() {
    let rendered = render_report(AssembleOptions::default());

    assert_eq!(rendered.media.len(), 1);
    assert_eq!(rendered.media[0].file_name, "image1.png");
    assert!(rendered.xml.contains(r#"r:embed="rIdMdsplice1""#));
    // 14 cm wide, half as high as the 800x400 figure.
    assert!(rendered.xml.contains(r#"<wp:extent cx="5040000" cy="2520000"/>"#));

    assert!(rendered.xml.contains("[Figure: figures/missing.png]"));
    assert_eq!(
        rendered.report.missing_resources,
        vec!["figures/missing.png".to_string()]
    );
    assert!(relationships_xml(&rendered.media).contains(r#"Target="media/image1.png""#));
}

#[test]
fn test_appendix_and_code_rendering() {
    let rendered = render_report(AssembleOptions::default());

    assert!(rendered.report.final_state.appendix_mode);
    assert!(rendered
        .xml
        .contains(r#"<w:t xml:space="preserve">    return 0;</w:t>"#));
    assert!(rendered
        .xml
        .contains(r#"<w:t xml:space="preserve">Appendix A. Source</w:t>"#));
    assert!(rendered
        .xml
        .contains(r#"<w:t xml:space="preserve">Goal</w:t>"#));
}

#[test]
fn test_options_add_page_break_and_spacer() {
    let rendered = render_report(AssembleOptions {
        page_break_before: true,
        spacer_after_table: true,
        ..AssembleOptions::default()
    });
    assert_eq!(rendered.report.nodes_inserted, 17);

    // The cover page already ends with a page break; the generated one follows it.
    let page_break = r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#;
    let breaks: Vec<_> = rendered.xml.match_indices(page_break).collect();
    assert_eq!(breaks.len(), 2);
    let heading = rendered.xml.find(">Goal<").unwrap();
    assert!(breaks[1].0 < heading);
    assert!(rendered.xml.contains("</w:tbl><w:p/>"));
}

#[test]
fn test_output_parses_back_as_template() {
    let rendered = render_report(AssembleOptions::default());
    let reparsed = WordmlFormat.parse(&rendered.xml).unwrap();

    assert_eq!(reparsed.marker_count(), 1);
    assert!(reparsed.marker_is_last());
    assert!(reparsed
        .nodes
        .iter()
        .all(|n| matches!(n, BodyNode::Template(_) | BodyNode::SectionProperties(_))));
}

#[test]
fn test_template_without_marker_is_rejected() {
    let template = read_fixture("template.xml");
    let start = template.find("<w:sectPr>").unwrap();
    let end = template.find("</w:sectPr>").unwrap() + "</w:sectPr>".len();
    let broken = format!("{}{}", &template[..start], &template[end..]);

    let err = render_wordml(
        "text",
        &broken,
        &NoResources,
        &ParseOptions::default(),
        AssembleOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("found 0"));
}

fn render_source(source: &str) -> String {
    render_wordml(
        source,
        &read_fixture("template.xml"),
        &NoResources,
        &ParseOptions::default(),
        AssembleOptions::default(),
    )
    .expect("source should render")
    .xml
}

#[test]
fn test_noncharacters_do_not_break_the_output() {
    let xml = render_source("a\u{FFFF}b **\u{FFFE}bold**\n- item\u{1}\n");
    assert!(roxmltree::Document::parse(&xml).is_ok());
    assert!(xml.contains(">ab </w:t>"));
}

#[test]
fn test_every_table_row_has_a_cell() {
    let xml = render_source("| |\n|---|\n| x |\n\n| a |\n|---|\n|  |\n");
    let doc = roxmltree::Document::parse(&xml).expect("output must be well-formed XML");
    let rows: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name((WML_NS, "tr")))
        .collect();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert!(row.children().any(|c| c.has_tag_name((WML_NS, "tc"))));
    }
    assert!(!xml.contains("<w:tblGrid></w:tblGrid>"));
}
