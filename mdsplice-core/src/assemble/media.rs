//! Image resolution and embedding
//!
//! Images are looked up through a [`ResourceResolver`]. A resolved image is embedded in a
//! centered paragraph at the configured display width, with the height taken from the image's own
//! aspect ratio. An unresolved image becomes an italic placeholder paragraph; this never fails
//! the assembly run.

use super::style::{cm_to_emu, pt_to_half_points, RenderStyle};
use crate::error::ResourceMissing;
use crate::ir::nodes::{
    Alignment, ImageData, Paragraph, ParagraphContent, ParagraphProps, RunProps, TextRun,
};
use crate::markup::ImageRef;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Supplies the bytes behind an image path written in the markup.
pub trait ResourceResolver {
    /// Return the resource bytes, or `None` when the path cannot be resolved.
    fn resolve(&self, path: &str) -> Option<Vec<u8>>;
}

impl<F> ResourceResolver for F
where
    F: Fn(&str) -> Option<Vec<u8>>,
{
    fn resolve(&self, path: &str) -> Option<Vec<u8>> {
        self(path)
    }
}

/// Resolves paths relative to a base directory on disk.
#[derive(Debug, Clone)]
pub struct FsResolver {
    base: PathBuf,
}

impl FsResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl ResourceResolver for FsResolver {
    fn resolve(&self, path: &str) -> Option<Vec<u8>> {
        let relative = path.trim_start_matches("./");
        let full = self.base.join(relative);
        match std::fs::read(&full) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::debug!("could not read {}: {err}", full.display());
                None
            }
        }
    }
}

/// In-memory resources keyed by the path used in the markup.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.resources.insert(path.into(), bytes);
    }
}

impl ResourceResolver for MemoryResolver {
    fn resolve(&self, path: &str) -> Option<Vec<u8>> {
        self.resources.get(path).cloned()
    }
}

/// Resolves nothing. Every image becomes a placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceResolver for NoResources {
    fn resolve(&self, _path: &str) -> Option<Vec<u8>> {
        None
    }
}

/// Look up an image and describe it for embedding.
pub fn resolve_image(
    image: &ImageRef,
    resolver: &dyn ResourceResolver,
    style: &RenderStyle,
) -> Result<ImageData, ResourceMissing> {
    let bytes = resolver.resolve(&image.path).ok_or_else(|| ResourceMissing {
        path: image.path.clone(),
    })?;

    let width_emu = cm_to_emu(style.image_width_cm);
    let (w, h) = intrinsic_size(&bytes).unwrap_or((4, 3));
    let height_emu = width_emu * u64::from(h) / u64::from(w.max(1));

    Ok(ImageData {
        name: file_name(&image.path),
        bytes,
        width_emu,
        height_emu,
    })
}

/// A centered paragraph holding the picture.
pub fn image_paragraph(data: ImageData) -> Paragraph {
    Paragraph {
        props: ParagraphProps {
            alignment: Some(Alignment::Center),
            ..ParagraphProps::default()
        },
        content: vec![ParagraphContent::Image(data)],
    }
}

/// A centered italic paragraph naming the missing resource.
pub fn placeholder_paragraph(missing: &ResourceMissing, style: &RenderStyle) -> Paragraph {
    let props = ParagraphProps {
        alignment: Some(Alignment::Center),
        ..ParagraphProps::default()
    };
    let run = TextRun::new(
        format!("[{}: {}]", style.placeholder_label, missing.path),
        RunProps {
            font: Some(style.body_font.family.clone()),
            size_half_points: Some(pt_to_half_points(style.placeholder_size_pt)),
            bold: false,
            italic: true,
        },
    );
    Paragraph::with_runs(props, vec![run])
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Pixel dimensions read from PNG, GIF or JPEG headers.
pub fn intrinsic_size(bytes: &[u8]) -> Option<(u32, u32)> {
    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    if bytes.starts_with(PNG_SIGNATURE) {
        let w = u32::from_be_bytes(bytes.get(16..20)?.try_into().ok()?);
        let h = u32::from_be_bytes(bytes.get(20..24)?.try_into().ok()?);
        return nonzero(w, h);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        let w = u16::from_le_bytes(bytes.get(6..8)?.try_into().ok()?);
        let h = u16::from_le_bytes(bytes.get(8..10)?.try_into().ok()?);
        return nonzero(u32::from(w), u32::from(h));
    }
    if bytes.starts_with(&[0xFF, 0xD8]) {
        return jpeg_size(bytes);
    }
    None
}

fn jpeg_size(bytes: &[u8]) -> Option<(u32, u32)> {
    let mut i = 2;
    while i + 4 <= bytes.len() {
        if bytes[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = bytes[i + 1];
        if marker == 0xFF {
            i += 1;
            continue;
        }
        // Markers without a length field.
        if marker == 0xD8 || marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        let len = usize::from(u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]));
        let is_frame = (0xC0..=0xCF).contains(&marker) && ![0xC4, 0xC8, 0xCC].contains(&marker);
        if is_frame {
            let h = u16::from_be_bytes(bytes.get(i + 5..i + 7)?.try_into().ok()?);
            let w = u16::from_be_bytes(bytes.get(i + 7..i + 9)?.try_into().ok()?);
            return nonzero(u32::from(w), u32::from(h));
        }
        if len < 2 {
            return None;
        }
        i += 2 + len;
    }
    None
}

fn nonzero(w: u32, h: u32) -> Option<(u32, u32)> {
    (w > 0 && h > 0).then_some((w, h))
}
