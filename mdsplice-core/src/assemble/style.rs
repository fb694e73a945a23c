//! Render style: fonts, sizes, indents and style ids applied to generated nodes.

use crate::ir::nodes::{Alignment, RunProps};
use crate::markup::HeadingLevel;

/// Twips per centimetre, as Word rounds it.
pub const TWIPS_PER_CM: f32 = 567.0;
/// English Metric Units per centimetre.
pub const EMU_PER_CM: f32 = 360_000.0;

pub fn cm_to_twips(cm: f32) -> u32 {
    (cm.max(0.0) * TWIPS_PER_CM).round() as u32
}

pub fn cm_to_emu(cm: f32) -> u64 {
    (cm.max(0.0) * EMU_PER_CM).round() as u64
}

pub fn pt_to_half_points(pt: f32) -> u32 {
    (pt.max(0.0) * 2.0).round() as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size_pt: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size_pt: f32) -> Self {
        Self {
            family: family.into(),
            size_pt,
        }
    }

    pub fn run_props(&self) -> RunProps {
        RunProps {
            font: Some(self.family.clone()),
            size_half_points: Some(pt_to_half_points(self.size_pt)),
            bold: false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingStyle {
    pub style_id: String,
    pub size_pt: f32,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub body_font: FontSpec,
    pub body_style_id: String,
    pub body_alignment: Alignment,
    /// Level 1, 2 and 3, in that order. Headings use the body font family.
    pub headings: [HeadingStyle; 3],
    pub list_style_id: String,
    pub list_indent_cm: f32,
    pub code_font: FontSpec,
    pub code_indent_cm: f32,
    pub inline_code_size_pt: f32,
    pub table_style_id: String,
    pub table_font_size_pt: f32,
    pub image_width_cm: f32,
    pub placeholder_label: String,
    pub placeholder_size_pt: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            body_font: FontSpec::new("Times New Roman", 14.0),
            body_style_id: "Normal".to_string(),
            body_alignment: Alignment::Justify,
            headings: [
                HeadingStyle {
                    style_id: "Heading1".to_string(),
                    size_pt: 16.0,
                    italic: false,
                },
                HeadingStyle {
                    style_id: "Heading2".to_string(),
                    size_pt: 14.0,
                    italic: false,
                },
                HeadingStyle {
                    style_id: "Heading3".to_string(),
                    size_pt: 14.0,
                    italic: true,
                },
            ],
            list_style_id: "ListParagraph".to_string(),
            list_indent_cm: 1.0,
            code_font: FontSpec::new("Courier New", 10.0),
            code_indent_cm: 1.0,
            inline_code_size_pt: 10.0,
            table_style_id: "TableGrid".to_string(),
            table_font_size_pt: 11.0,
            image_width_cm: 14.0,
            placeholder_label: "Figure".to_string(),
            placeholder_size_pt: 12.0,
        }
    }
}

impl RenderStyle {
    pub fn heading(&self, level: HeadingLevel) -> &HeadingStyle {
        &self.headings[usize::from(level.as_u8() - 1)]
    }
}
