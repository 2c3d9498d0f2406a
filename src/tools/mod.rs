mod command;
mod exiv2;
mod imagemagick;

use anyhow::Context;
use std::io::Write;
use std::path::Path;

use crate::error::{AnnotateError, Stage};
use crate::geometry::{Dimensions, Geometry};
use crate::settings::Settings;

pub use command::{ToolCommand, ToolProgram};
pub use exiv2::{Exiv2, metadata_value};
pub use imagemagick::{ImageMagick, LabelStyle, escape_label_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRequest<'a> {
    pub text: &'a str,
    pub point_size: u32,
    pub font: &'a str,
    pub rotated: bool,
}

/// A rendered label kept in a temporary file. The file is removed when the
/// bitmap is dropped, on success and error paths alike.
#[derive(Debug)]
pub struct LabelBitmap {
    file: tempfile::NamedTempFile,
}

impl LabelBitmap {
    pub(crate) const SUFFIX: &'static str = ".miff";

    pub fn empty() -> Result<Self, AnnotateError> {
        let file = tempfile::Builder::new()
            .prefix("annotate-label-")
            .suffix(Self::SUFFIX)
            .tempfile()
            .context("failed to create temp file for label")
            .map_err(|err| AnnotateError::collaborator(Stage::Render, format!("{err:#}")))?;
        Ok(Self { file })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AnnotateError> {
        let mut bitmap = Self::empty()?;
        bitmap
            .file
            .write_all(bytes)
            .and_then(|_| bitmap.file.flush())
            .context("failed to write label bitmap")
            .map_err(|err| AnnotateError::collaborator(Stage::Render, format!("{err:#}")))?;
        Ok(bitmap)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

pub trait LabelRenderer {
    fn render_label(&self, request: &LabelRequest<'_>) -> Result<LabelBitmap, AnnotateError>;
}

pub trait DimensionProbe {
    fn measure_image(&self, path: &Path) -> Result<Dimensions, AnnotateError>;
    fn measure_label(&self, label: &LabelBitmap) -> Result<Dimensions, AnnotateError>;
}

#[derive(Debug, Clone, Copy)]
pub struct CompositeRequest<'a> {
    pub base: &'a Path,
    pub label: &'a LabelBitmap,
    pub geometry: Geometry,
    pub output: &'a Path,
}

pub trait Compositor {
    fn composite(&self, request: &CompositeRequest<'_>) -> Result<(), AnnotateError>;
}

pub trait MetadataWriter {
    fn write_caption(&self, image: &Path, caption: &str) -> Result<(), AnnotateError>;
}

pub trait Toolchain: LabelRenderer + DimensionProbe + Compositor + MetadataWriter {}

impl<T> Toolchain for T where T: LabelRenderer + DimensionProbe + Compositor + MetadataWriter {}

#[derive(Debug, Clone)]
pub struct SystemTools {
    pub imagemagick: ImageMagick,
    pub exiv2: Exiv2,
}

impl SystemTools {
    pub fn from_settings(settings: &Settings) -> Result<Self, AnnotateError> {
        Ok(Self {
            imagemagick: ImageMagick::from_settings(settings)?,
            exiv2: Exiv2::from_settings(settings)?,
        })
    }
}

impl LabelRenderer for SystemTools {
    fn render_label(&self, request: &LabelRequest<'_>) -> Result<LabelBitmap, AnnotateError> {
        self.imagemagick.render_label(request)
    }
}

impl DimensionProbe for SystemTools {
    fn measure_image(&self, path: &Path) -> Result<Dimensions, AnnotateError> {
        self.imagemagick.measure_image(path)
    }

    fn measure_label(&self, label: &LabelBitmap) -> Result<Dimensions, AnnotateError> {
        self.imagemagick.measure_label(label)
    }
}

impl Compositor for SystemTools {
    fn composite(&self, request: &CompositeRequest<'_>) -> Result<(), AnnotateError> {
        self.imagemagick.composite(request)
    }
}

impl MetadataWriter for SystemTools {
    fn write_caption(&self, image: &Path, caption: &str) -> Result<(), AnnotateError> {
        self.exiv2.write_caption(image, caption)
    }
}

fn program(settings_value: &str, key: &str) -> Result<ToolProgram, AnnotateError> {
    ToolProgram::parse(settings_value)
        .ok_or_else(|| AnnotateError::Settings(anyhow::anyhow!("tools.{} is empty", key)))
}
