//! CLI-specific transforms
//!
//! Each transform is a stage + format combination (e.g., "blocks-json", "document-treeviz").
//!
//! ## Transform Pipeline
//!
//! 1. **Block parsing** - Source lines → Blocks
//!    - `blocks-json`: Block records as JSON
//!    - `blocks-treeviz`: Tree visualization with Unicode icons
//!
//! 2. **Inline tokenizing** - Textual blocks → Runs
//!    - `runs-json`: Styled runs of every paragraph and list line
//!
//! 3. **Assembly** - Blocks → Document body
//!    - `document-treeviz`: The body after splicing into the template (or into an empty body
//!      when no template is given)
//!
//! ## Extra Parameters
//!
//! `document-treeviz` accepts `--extra-show-runs` and `--extra-show-template false`. Monospace
//! runs are recognised by the configured code font unless `--extra-code-font` names another.

use mdsplice_core::formats::treeviz::blocks_to_treeviz_str;
use mdsplice_core::ir::nodes::{BodyNode, Document, RawXml};
use mdsplice_core::markup::{parse_source_with_options, tokenize, Block};
use mdsplice_core::{AssembleOptions, Assembler, FormatRegistry, FsResolver, ParseOptions};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &[
    "blocks-json",
    "blocks-treeviz",
    "runs-json",
    "document-treeviz",
];

/// Everything a transform may need besides the source text.
#[derive(Debug, Clone, Default)]
pub struct TransformContext {
    pub parse: ParseOptions,
    pub assemble: AssembleOptions,
    /// Template `document.xml` text, for `document-treeviz`.
    pub template: Option<String>,
    /// Directory image paths resolve against.
    pub base_dir: PathBuf,
}

/// Execute a named transform on a source file with optional extra parameters
///
/// # Examples
///
/// ```ignore
/// let context = TransformContext::default();
/// let output = execute_transform("# Title\n", "blocks-treeviz", &context, &HashMap::new())?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    context: &TransformContext,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let blocks = parse_source_with_options(source, &context.parse);

    match transform_name {
        "blocks-json" => serde_json::to_string_pretty(&blocks)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "blocks-treeviz" => Ok(blocks_to_treeviz_str(&blocks)),
        "runs-json" => serde_json::to_string_pretty(&runs_to_json(&blocks))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "document-treeviz" => {
            let registry = FormatRegistry::default();
            let mut doc = match &context.template {
                Some(xml) => registry
                    .parse(xml, "wordml")
                    .map_err(|e| format!("Template error: {e}"))?,
                None => empty_body(),
            };
            let resolver = FsResolver::new(&context.base_dir);
            Assembler::with_options(&resolver, context.assemble.clone())
                .assemble(&blocks, &mut doc)
                .map_err(|e| format!("Assembly failed: {e}"))?;
            let mut params = extra_params.clone();
            params
                .entry("code-font".to_string())
                .or_insert_with(|| context.assemble.style.code_font.family.clone());
            registry
                .serialize_with_options(&doc, "treeviz", &params)
                .map_err(|e| format!("Transform failed: {e}"))
        }
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn empty_body() -> Document {
    Document::new(vec![BodyNode::SectionProperties(RawXml(
        "<w:sectPr/>".to_string(),
    ))])
}

/// Runs of every textual block, keyed by block index.
fn runs_to_json(blocks: &[Block]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let text = match block {
                Block::Paragraph { text } | Block::Bullet { text } | Block::Numbered { text } => {
                    text
                }
                _ => return None,
            };
            Some(json!({
                "block": index,
                "kind": block.kind(),
                "runs": tokenize(text),
            }))
        })
        .collect();
    serde_json::Value::Array(entries)
}
