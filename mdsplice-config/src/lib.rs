//! Shared configuration loader for the mdsplice toolchain.
//!
//! `defaults/mdsplice.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdspliceConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdsplice_core::assemble::style::{FontSpec, HeadingStyle};
use mdsplice_core::ir::nodes::Alignment;
use mdsplice_core::{AssembleOptions, ParseOptions, RenderStyle};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/mdsplice.default.toml");

/// Top-level configuration consumed by mdsplice applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdspliceConfig {
    pub markup: MarkupConfig,
    pub render: RenderConfig,
    pub images: ImagesConfig,
    pub inspect: InspectConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkupConfig {
    pub appendix_markers: Vec<String>,
    pub skip_front_matter: bool,
}

impl From<&MarkupConfig> for ParseOptions {
    fn from(config: &MarkupConfig) -> Self {
        ParseOptions {
            appendix_markers: config.appendix_markers.clone(),
            skip_front_matter: config.skip_front_matter,
        }
    }
}

/// Layout of generated content.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub page_break_before: bool,
    pub spacer_after_table: bool,
    pub skip_title_heading: bool,
    pub skip_math_lines: bool,
    pub skip_anchor_links: bool,
    pub fonts: FontsConfig,
    pub paragraphs: ParagraphsConfig,
    pub headings: HeadingsConfig,
    pub tables: TablesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontsConfig {
    pub body_family: String,
    pub body_size_pt: f32,
    pub code_family: String,
    pub code_size_pt: f32,
    pub inline_code_size_pt: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParagraphsConfig {
    pub body_style_id: String,
    pub alignment: AlignmentConfig,
    pub list_style_id: String,
    pub list_indent_cm: f32,
    pub code_indent_cm: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentConfig {
    Left,
    Center,
    Right,
    Justify,
}

impl From<AlignmentConfig> for Alignment {
    fn from(config: AlignmentConfig) -> Self {
        match config {
            AlignmentConfig::Left => Alignment::Left,
            AlignmentConfig::Center => Alignment::Center,
            AlignmentConfig::Right => Alignment::Right,
            AlignmentConfig::Justify => Alignment::Justify,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadingsConfig {
    pub h1: HeadingConfig,
    pub h2: HeadingConfig,
    pub h3: HeadingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadingConfig {
    pub style_id: String,
    pub size_pt: f32,
    pub italic: bool,
}

impl From<&HeadingConfig> for HeadingStyle {
    fn from(config: &HeadingConfig) -> Self {
        HeadingStyle {
            style_id: config.style_id.clone(),
            size_pt: config.size_pt,
            italic: config.italic,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TablesConfig {
    pub style_id: String,
    pub font_size_pt: f32,
}

/// Image lookup and sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    pub base_dir: String,
    pub width_cm: f32,
    pub placeholder_label: String,
    pub placeholder_size_pt: f32,
}

impl ImagesConfig {
    /// The configured base directory, or `None` when images resolve next to the input.
    pub fn base_dir(&self) -> Option<PathBuf> {
        (!self.base_dir.trim().is_empty()).then(|| PathBuf::from(&self.base_dir))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub default_transform: String,
}

impl MdspliceConfig {
    pub fn parse_options(&self) -> ParseOptions {
        (&self.markup).into()
    }

    pub fn render_style(&self) -> RenderStyle {
        let fonts = &self.render.fonts;
        let paragraphs = &self.render.paragraphs;
        let headings = &self.render.headings;
        RenderStyle {
            body_font: FontSpec::new(fonts.body_family.clone(), fonts.body_size_pt),
            body_style_id: paragraphs.body_style_id.clone(),
            body_alignment: paragraphs.alignment.into(),
            headings: [
                (&headings.h1).into(),
                (&headings.h2).into(),
                (&headings.h3).into(),
            ],
            list_style_id: paragraphs.list_style_id.clone(),
            list_indent_cm: paragraphs.list_indent_cm,
            code_font: FontSpec::new(fonts.code_family.clone(), fonts.code_size_pt),
            code_indent_cm: paragraphs.code_indent_cm,
            inline_code_size_pt: fonts.inline_code_size_pt,
            table_style_id: self.render.tables.style_id.clone(),
            table_font_size_pt: self.render.tables.font_size_pt,
            image_width_cm: self.images.width_cm,
            placeholder_label: self.images.placeholder_label.clone(),
            placeholder_size_pt: self.images.placeholder_size_pt,
        }
    }

    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            style: self.render_style(),
            page_break_before: self.render.page_break_before,
            spacer_after_table: self.render.spacer_after_table,
            skip_title_heading: self.render.skip_title_heading,
            skip_math_lines: self.render.skip_math_lines,
            skip_anchor_links: self.render.skip_anchor_links,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdspliceConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdspliceConfig, ConfigError> {
    Loader::new().build()
}
