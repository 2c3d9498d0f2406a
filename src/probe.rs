use std::path::Path;

use tracing::debug;

use crate::error::AnnotateError;
use crate::geometry::{Dimensions, LabelExtent};
use crate::tools::{DimensionProbe, LabelBitmap};

pub fn measure_image<P: DimensionProbe + ?Sized>(
    probe: &P,
    path: &Path,
) -> Result<Dimensions, AnnotateError> {
    if !path.is_file() {
        return Err(AnnotateError::probe(path, "no such file"));
    }
    let dims = probe.measure_image(path)?;
    debug!("{} is {}", path.display(), dims);
    Ok(dims)
}

/// A rendered label whose size is measured on first use and then reused,
/// so each run asks the probe at most once however many axes need it.
pub struct MeasuredLabel<'a, P: DimensionProbe + ?Sized> {
    probe: &'a P,
    bitmap: &'a LabelBitmap,
    cached: Option<Dimensions>,
}

impl<'a, P: DimensionProbe + ?Sized> MeasuredLabel<'a, P> {
    pub fn new(probe: &'a P, bitmap: &'a LabelBitmap) -> Self {
        Self {
            probe,
            bitmap,
            cached: None,
        }
    }

    pub fn measured(&self) -> Option<Dimensions> {
        self.cached
    }
}

impl<P: DimensionProbe + ?Sized> LabelExtent for MeasuredLabel<'_, P> {
    fn label_dimensions(&mut self) -> Result<Dimensions, AnnotateError> {
        if let Some(dims) = self.cached {
            return Ok(dims);
        }
        let dims = self.probe.measure_label(self.bitmap)?;
        debug!("rendered label is {}", dims);
        self.cached = Some(dims);
        Ok(dims)
    }
}
