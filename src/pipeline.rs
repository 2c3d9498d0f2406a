use std::path::PathBuf;

use tracing::{info, info_span, warn};

use crate::Config;
use crate::error::AnnotateError;
use crate::geometry::{Axis, Dimensions, Geometry, GeometryCalculator};
use crate::probe::{self, MeasuredLabel};
use crate::settings::Settings;
use crate::tools::{CompositeRequest, LabelRequest, Toolchain};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub geometry: Geometry,
    pub overflow: Vec<Axis>,
    pub image: Dimensions,
    /// `None` when no anchor needed the label's size.
    pub label: Option<Dimensions>,
    pub output: PathBuf,
}

pub fn annotate<T: Toolchain + ?Sized>(
    config: &Config,
    settings: &Settings,
    tools: &T,
) -> Result<Outcome, AnnotateError> {
    config.validate()?;
    let _span = info_span!("annotate", input = %config.input.display()).entered();

    let image = probe::measure_image(tools, &config.input)?;

    let request = LabelRequest {
        text: &config.text,
        point_size: config.text_size,
        font: config.font.as_deref().unwrap_or(&settings.label.font),
        rotated: config.orientation.rotated,
    };
    let bitmap = tools.render_label(&request)?;
    let mut label = MeasuredLabel::new(tools, &bitmap);
    let placement = GeometryCalculator::new(config.border, settings.composite.center).resolve(
        &config.orientation,
        image,
        &mut label,
    )?;
    let label = label.measured();
    if let Some(size) = label {
        for &axis in &placement.overflow {
            warn!(
                "{} is too small for the text ({} {}px < label {}px)",
                config.input.display(),
                axis,
                image.extent(axis),
                size.extent(axis)
            );
        }
    }

    tools.composite(&CompositeRequest {
        base: &config.input,
        label: &bitmap,
        geometry: placement.geometry,
        output: &config.output,
    })?;
    info!("wrote {}", config.output.display());

    tools.write_caption(&config.output, &config.text)?;

    Ok(Outcome {
        geometry: placement.geometry,
        overflow: placement.overflow,
        image,
        label,
        output: config.output.clone(),
    })
}
