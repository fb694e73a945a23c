//! Media parts referenced by embedded pictures.
//!
//! Pictures are numbered in document order, table cells included. The serializer and
//! [`media_parts`] share [`MediaNumbering`], so relationship ids written into the XML always match
//! the listed parts.

use crate::ir::nodes::{BodyNode, Document, ImageData, Paragraph};
use std::path::Path;

pub const REL_ID_PREFIX: &str = "rIdMdsplice";
const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

#[derive(Debug, Default)]
pub(crate) struct MediaNumbering {
    count: usize,
}

impl MediaNumbering {
    /// One-based index and relationship id of the next picture.
    pub(crate) fn next(&mut self) -> (usize, String) {
        self.count += 1;
        (self.count, format!("{REL_ID_PREFIX}{}", self.count))
    }
}

/// A picture to store in the package next to `word/document.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPart {
    pub rel_id: String,
    /// Unique name under `media/`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl MediaPart {
    /// The `Relationship` element for `word/_rels/document.xml.rels`.
    pub fn relationship_xml(&self) -> String {
        format!(
            r#"<Relationship Id="{}" Type="{IMAGE_REL_TYPE}" Target="media/{}"/>"#,
            self.rel_id, self.file_name
        )
    }
}

/// Every embedded picture of `doc`, in the order the serializer numbers them.
pub fn media_parts(doc: &Document) -> Vec<MediaPart> {
    let mut numbering = MediaNumbering::default();
    images(doc)
        .map(|image| {
            let (index, rel_id) = numbering.next();
            MediaPart {
                rel_id,
                file_name: format!("image{index}.{}", extension(&image.name)),
                bytes: image.bytes.clone(),
            }
        })
        .collect()
}

/// A complete relationships part listing the given media.
pub fn relationships_xml(parts: &[MediaPart]) -> String {
    let mut out = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    );
    out.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for part in parts {
        out.push_str(&part.relationship_xml());
    }
    out.push_str("</Relationships>");
    out
}

fn images(doc: &Document) -> impl Iterator<Item = &ImageData> {
    doc.nodes.iter().flat_map(|node| {
        let paragraphs: Vec<&Paragraph> = match node {
            BodyNode::Paragraph(p) => vec![p],
            BodyNode::Table(t) => t
                .rows
                .iter()
                .flat_map(|row| &row.cells)
                .flat_map(|cell| &cell.paragraphs)
                .collect(),
            BodyNode::Template(_) | BodyNode::SectionProperties(_) => Vec::new(),
        };
        paragraphs.into_iter().flat_map(Paragraph::images)
    })
}

fn extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{ParagraphContent, ParagraphProps, RawXml};

    fn picture(name: &str, bytes: &[u8]) -> BodyNode {
        BodyNode::Paragraph(Paragraph {
            props: ParagraphProps::default(),
            content: vec![ParagraphContent::Image(ImageData {
                name: name.to_string(),
                bytes: bytes.to_vec(),
                width_emu: 1,
                height_emu: 1,
            })],
        })
    }

    #[test]
    fn parts_follow_document_order() {
        let doc = Document::new(vec![
            BodyNode::Template(RawXml("<w:p/>".into())),
            picture("plot.PNG", b"one"),
            picture("same/plot.PNG", b"two"),
            picture("noext", b"three"),
            BodyNode::SectionProperties(RawXml("<w:sectPr/>".into())),
        ]);
        let parts = media_parts(&doc);
        let names: Vec<_> = parts.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["image1.png", "image2.png", "image3.bin"]);
        assert_eq!(parts[1].rel_id, "rIdMdsplice2");
        assert_eq!(parts[1].bytes, b"two");
    }

    #[test]
    fn relationship_targets_media_folder() {
        let part = MediaPart {
            rel_id: "rIdMdsplice1".into(),
            file_name: "image1.png".into(),
            bytes: Vec::new(),
        };
        assert_eq!(
            part.relationship_xml(),
            r#"<Relationship Id="rIdMdsplice1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>"#
        );
        assert!(relationships_xml(&[part]).ends_with("</Relationships>"));
    }

    #[test]
    fn no_pictures_no_parts() {
        assert!(media_parts(&Document::default()).is_empty());
    }
}
