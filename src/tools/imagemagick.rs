use std::path::Path;

use tracing::debug;

use super::command::{ToolCommand, ToolProgram, coder_path};
use super::{CompositeRequest, LabelBitmap, LabelRequest, program};
use crate::error::{AnnotateError, Stage};
use crate::geometry::Dimensions;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStyle {
    pub density: u32,
    pub background: String,
    pub fill: String,
    pub stroke_width: u32,
    pub gravity: String,
}

#[derive(Debug, Clone)]
pub struct ImageMagick {
    pub(crate) convert: ToolProgram,
    pub(crate) identify: ToolProgram,
    pub(crate) composite: ToolProgram,
    pub(crate) style: LabelStyle,
    pub(crate) compose: String,
}

impl ImageMagick {
    pub fn from_settings(settings: &Settings) -> Result<Self, AnnotateError> {
        Ok(Self {
            convert: program(&settings.tools.convert, "convert")?,
            identify: program(&settings.tools.identify, "identify")?,
            composite: program(&settings.tools.composite, "composite")?,
            style: LabelStyle {
                density: settings.label.density,
                background: settings.label.background.clone(),
                fill: settings.label.fill.clone(),
                stroke_width: settings.label.stroke_width,
                gravity: settings.label.gravity.clone(),
            },
            compose: settings.composite.compose.clone(),
        })
    }

    pub fn render_command(&self, request: &LabelRequest<'_>, target: &Path) -> ToolCommand {
        let style = &self.style;
        let mut command = self.convert.command().args([
            "-density".to_string(),
            style.density.to_string(),
            "-pointsize".to_string(),
            request.point_size.to_string(),
            "-background".to_string(),
            style.background.clone(),
            "-fill".to_string(),
            style.fill.clone(),
            "-gravity".to_string(),
            style.gravity.clone(),
            "-font".to_string(),
            request.font.to_string(),
            format!("label: {}", escape_label_text(request.text)),
            "-strokewidth".to_string(),
            style.stroke_width.to_string(),
        ]);
        if request.rotated {
            command = command.args(["-rotate", "90"]);
        }
        command.arg(coder_path("miff", target))
    }

    pub fn identify_command(&self, path: &Path) -> ToolCommand {
        self.identify
            .command()
            .args(["-format", "%w %h\\n"])
            .arg(path)
    }

    pub fn composite_command(&self, request: &CompositeRequest<'_>) -> ToolCommand {
        self.composite
            .command()
            .args(["-compose", self.compose.as_str()])
            .arg("-geometry")
            .arg(request.geometry.to_string())
            .arg(request.label.path())
            .arg(request.base)
            .arg(request.output)
    }

    pub fn render_label(&self, request: &LabelRequest<'_>) -> Result<LabelBitmap, AnnotateError> {
        let bitmap = LabelBitmap::empty()?;
        self.render_command(request, bitmap.path())
            .run(Stage::Render)?;
        Ok(bitmap)
    }

    /// Size of the base image. A header read is tried first; formats the
    /// `image` crate does not know go through `identify`.
    pub fn measure_image(&self, path: &Path) -> Result<Dimensions, AnnotateError> {
        match image::image_dimensions(path) {
            Ok((width, height)) if width > 0 && height > 0 => {
                return Ok(Dimensions::new(width, height));
            }
            Ok(_) => {}
            Err(err) => debug!("header read failed for {}: {}", path.display(), err),
        }
        self.identify(path)
            .map_err(|err| AnnotateError::probe(path, err.to_string()))
    }

    pub fn measure_label(&self, label: &LabelBitmap) -> Result<Dimensions, AnnotateError> {
        self.identify(label.path())
    }

    pub fn composite(&self, request: &CompositeRequest<'_>) -> Result<(), AnnotateError> {
        self.composite_command(request).run(Stage::Composite)?;
        Ok(())
    }

    fn identify(&self, path: &Path) -> Result<Dimensions, AnnotateError> {
        let stdout = self.identify_command(path).run(Stage::Measure)?;
        let stdout = String::from_utf8_lossy(&stdout);
        parse_identify_output(&stdout).ok_or_else(|| {
            AnnotateError::collaborator(
                Stage::Measure,
                format!("unexpected identify output: {:?}", stdout.trim()),
            )
        })
    }
}

/// Parse `"<w> <h>"` lines; multi-frame images report one line per frame and
/// the first frame wins.
pub(crate) fn parse_identify_output(stdout: &str) -> Option<Dimensions> {
    let line = stdout.lines().map(str::trim).find(|line| !line.is_empty())?;
    let mut parts = line.split_whitespace();
    let width = parts.next()?.parse::<u32>().ok()?;
    let height = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() || width == 0 || height == 0 {
        return None;
    }
    Some(Dimensions::new(width, height))
}

/// Escape caption text for ImageMagick's `label:` coder, which expands
/// `%` escapes and backslash sequences.
pub fn escape_label_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '%' => out.push_str("%%"),
            _ => out.push(ch),
        }
    }
    out
}
