//! Template reader for `word/document.xml`.
//!
//! The XML is validated with roxmltree, then sliced by byte ranges so that every template byte
//! survives a parse/serialize round trip. Text between body children (indentation, comments) is
//! kept with the element that follows it; whatever trails the last child joins the epilog.

use super::{WML_NS, WML_PREFIX};
use crate::error::FormatError;
use crate::ir::nodes::{BodyNode, Document, RawXml};
use roxmltree::Node;

pub fn parse_document(source: &str) -> Result<Document, FormatError> {
    let xml = roxmltree::Document::parse(source)
        .map_err(|e| FormatError::ParseError(format!("XML parsing error: {e}")))?;

    let root = xml.root_element();
    if root.lookup_namespace_uri(Some(WML_PREFIX)) != Some(WML_NS) {
        return Err(FormatError::ParseError(format!(
            "prefix '{WML_PREFIX}' is not bound to {WML_NS}"
        )));
    }
    if !is_wml(root, "document") {
        return Err(FormatError::ParseError(format!(
            "Root element is <{}>, expected <w:document>",
            root.tag_name().name()
        )));
    }

    let body = root
        .children()
        .find(|n| is_wml(*n, "body"))
        .ok_or_else(|| FormatError::ParseError("document has no <w:body>".to_string()))?;

    let range = body.range();
    let body_text = &source[range.clone()];
    let open_end = start_tag_end(body_text).ok_or_else(|| {
        FormatError::ParseError("unterminated <w:body> start tag".to_string())
    })?;

    // <w:body/> is expanded so generated content has somewhere to go.
    if body_text[..open_end].ends_with("/>") {
        let open_tag = body_text[..open_end - 2].trim_end();
        return Ok(Document {
            prolog: format!("{}{open_tag}>", &source[..range.start]),
            nodes: Vec::new(),
            epilog: format!("</{WML_PREFIX}:body>{}", &source[range.end..]),
        });
    }

    let mut cursor = range.start + open_end;
    let prolog = source[..cursor].to_string();
    let mut nodes = Vec::new();

    for child in body.children().filter(Node::is_element) {
        let end = child.range().end;
        let raw = RawXml(source[cursor..end].to_string());
        nodes.push(if is_wml(child, "sectPr") {
            BodyNode::SectionProperties(raw)
        } else {
            BodyNode::Template(raw)
        });
        cursor = end;
    }

    let markers = nodes.iter().filter(|n| n.is_marker()).count();
    log::debug!(
        "parsed template body: {} nodes, {markers} section properties",
        nodes.len()
    );

    Ok(Document {
        prolog,
        nodes,
        epilog: source[cursor..].to_string(),
    })
}

fn is_wml(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WML_NS)
}

/// Byte length of the start tag at the beginning of `element`, quotes respected.
fn start_tag_end(element: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in element.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}
