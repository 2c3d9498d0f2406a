use std::path::PathBuf;

pub mod error;
pub mod geometry;
pub mod logging;
pub mod orientation;
pub mod pipeline;
pub mod probe;
pub mod settings;
mod test_util;
pub mod tools;

pub use error::{AnnotateError, OrientationError, Stage};
pub use geometry::{Axis, CenterPolicy, Dimensions, Geometry, GeometryCalculator, Placement};
pub use orientation::{HorizontalAnchor, OrientationSpec, VerticalAnchor};
pub use pipeline::Outcome;
pub use settings::Settings;

pub const DEFAULT_TEXT_SIZE: u32 = 24;
pub const DEFAULT_BORDER: u32 = 30;
pub const DEFAULT_ORIENTATION: &str = "top-left-horizontal";

#[derive(Debug, Clone)]
pub struct Config {
    pub text: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub text_size: u32,
    pub border: u32,
    pub orientation: OrientationSpec,
    pub font: Option<String>,
    pub settings_path: Option<PathBuf>,
}

impl Config {
    pub fn new(
        text: impl Into<String>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            text: text.into(),
            input: input.into(),
            output: output.into(),
            text_size: DEFAULT_TEXT_SIZE,
            border: DEFAULT_BORDER,
            orientation: OrientationSpec::default(),
            font: None,
            settings_path: None,
        }
    }

    pub fn with_orientation(mut self, value: &str) -> Result<Self, AnnotateError> {
        self.orientation = OrientationSpec::parse(value)?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), AnnotateError> {
        if self.input.as_os_str().is_empty() {
            return Err(AnnotateError::Argument("input file is empty".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(AnnotateError::Argument("output file is empty".to_string()));
        }
        if self.text_size == 0 {
            return Err(AnnotateError::Argument(
                "text size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn run(config: &Config) -> Result<Outcome, AnnotateError> {
    let settings =
        settings::load_settings(config.settings_path.as_deref()).map_err(AnnotateError::Settings)?;
    let tools = tools::SystemTools::from_settings(&settings)?;
    pipeline::annotate(config, &settings, &tools)
}
