//! Icon mapping for tree visualizations
//!
//! One Unicode character per node kind, shared by the document and block outlines.

/// Get the Unicode icon for a node kind
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Template" => "⋯",
        "SectionProperties" => "⌘",
        "Heading" => "§",
        "Paragraph" => "¶",
        "Bullet" => "•",
        "Numbered" => "#",
        "Table" => "⊞",
        "TableRow" => "☰",
        "Code" => "𝒱",
        "Image" => "▣",
        "PageBreak" => "⤓",
        "HorizontalRule" | "Blank" => "⎯",
        "Text" => "◦",
        "Strong" => "𝐁",
        "Emphasis" => "𝐼",
        "Monospace" => "⌨",
        _ => "○",
    }
}
