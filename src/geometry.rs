use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::error::AnnotateError;
use crate::orientation::{Edge, OrientationSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Horizontal => "width",
            Axis::Vertical => "height",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn extent(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CenterPolicy {
    #[default]
    Origin,
    BoundingBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub x: i64,
    pub y: i64,
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}{:+}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisOffset {
    pub offset: i64,
    pub overflow: bool,
}

/// Offset along one axis. `label_extent` is ignored for leading edges.
pub fn edge_offset(
    edge: Edge,
    border: u32,
    image_extent: u32,
    label_extent: u32,
    center: CenterPolicy,
) -> AxisOffset {
    let border = i64::from(border);
    let image = i64::from(image_extent);
    let label = i64::from(label_extent);
    match edge {
        Edge::Leading => AxisOffset {
            offset: border,
            overflow: false,
        },
        Edge::Trailing => AxisOffset {
            offset: image - label - border,
            overflow: image < label,
        },
        Edge::Center => {
            let offset = match center {
                CenterPolicy::Origin => image / 2,
                CenterPolicy::BoundingBox => (image - label).div_euclid(2),
            };
            AxisOffset {
                offset,
                overflow: image < label,
            }
        }
    }
}

pub trait LabelExtent {
    fn label_dimensions(&mut self) -> Result<Dimensions, AnnotateError>;
}

impl LabelExtent for Dimensions {
    fn label_dimensions(&mut self) -> Result<Dimensions, AnnotateError> {
        Ok(*self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub geometry: Geometry,
    pub overflow: Vec<Axis>,
}

#[derive(Debug, Clone, Copy)]
pub struct GeometryCalculator {
    pub border: u32,
    pub center: CenterPolicy,
}

impl GeometryCalculator {
    pub fn new(border: u32, center: CenterPolicy) -> Self {
        Self { border, center }
    }

    /// The label is measured as composited, already rotated for vertical text.
    /// An oversized label ends up in [`Placement::overflow`], never as an error.
    pub fn resolve<L: LabelExtent + ?Sized>(
        &self,
        orientation: &OrientationSpec,
        image: Dimensions,
        label: &mut L,
    ) -> Result<Placement, AnnotateError> {
        let mut overflow = Vec::new();
        let x = self.axis(
            Axis::Horizontal,
            orientation.horizontal.edge(),
            image,
            label,
            &mut overflow,
        )?;
        let y = self.axis(
            Axis::Vertical,
            orientation.vertical.edge(),
            image,
            label,
            &mut overflow,
        )?;
        let geometry = Geometry { x, y };
        debug!("geometry for {} on {}: {}", orientation, image, geometry);
        Ok(Placement { geometry, overflow })
    }

    fn axis<L: LabelExtent + ?Sized>(
        &self,
        axis: Axis,
        edge: Edge,
        image: Dimensions,
        label: &mut L,
        overflow: &mut Vec<Axis>,
    ) -> Result<i64, AnnotateError> {
        let image_extent = image.extent(axis);
        let label_extent = match edge {
            Edge::Leading => 0,
            Edge::Trailing | Edge::Center => label.label_dimensions()?.extent(axis),
        };
        let result = edge_offset(edge, self.border, image_extent, label_extent, self.center);
        if result.overflow {
            debug!(
                "label overflows the image {} ({}px < {}px)",
                axis, image_extent, label_extent
            );
            overflow.push(axis);
        }
        Ok(result.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::{HorizontalAnchor, VerticalAnchor};

    struct CountingLabel {
        dims: Dimensions,
        calls: usize,
    }

    impl LabelExtent for CountingLabel {
        fn label_dimensions(&mut self) -> Result<Dimensions, AnnotateError> {
            self.calls += 1;
            Ok(self.dims)
        }
    }

    fn spec(value: &str) -> OrientationSpec {
        OrientationSpec::parse(value).expect("orientation")
    }

    #[test]
    fn leading_edge_is_border_regardless_of_size() {
        for (image, label) in [(500, 100), (80, 100), (1, 10_000), (10_000, 0)] {
            let result = edge_offset(Edge::Leading, 30, image, label, CenterPolicy::Origin);
            assert_eq!(result, AxisOffset { offset: 30, overflow: false });
        }
    }

    #[test]
    fn trailing_edge_subtracts_label_and_border() {
        let result = edge_offset(Edge::Trailing, 30, 500, 100, CenterPolicy::Origin);
        assert_eq!(result, AxisOffset { offset: 370, overflow: false });
    }

    #[test]
    fn trailing_edge_overflow_goes_negative_and_flags() {
        let result = edge_offset(Edge::Trailing, 30, 80, 100, CenterPolicy::Origin);
        assert_eq!(result, AxisOffset { offset: -50, overflow: true });
    }

    #[test]
    fn center_origin_is_truncated_half_extent() {
        for label in [0, 60, 399] {
            let result = edge_offset(Edge::Center, 30, 400, label, CenterPolicy::Origin);
            assert_eq!(result.offset, 200);
        }
        assert_eq!(
            edge_offset(Edge::Center, 30, 401, 10, CenterPolicy::Origin).offset,
            200
        );
    }

    #[test]
    fn center_bounding_box_floors() {
        assert_eq!(
            edge_offset(Edge::Center, 30, 300, 60, CenterPolicy::BoundingBox).offset,
            120
        );
        let result = edge_offset(Edge::Center, 30, 80, 101, CenterPolicy::BoundingBox);
        assert_eq!(result, AxisOffset { offset: -11, overflow: true });
    }

    #[test]
    fn center_flags_overflow() {
        let result = edge_offset(Edge::Center, 30, 50, 60, CenterPolicy::Origin);
        assert_eq!(result, AxisOffset { offset: 25, overflow: true });
    }

    #[test]
    fn geometry_always_carries_a_sign() {
        assert_eq!(Geometry { x: 250, y: 170 }.to_string(), "+250+170");
        assert_eq!(Geometry { x: 30, y: -50 }.to_string(), "+30-50");
        assert_eq!(Geometry { x: 0, y: -4 }.to_string(), "+0-4");
        assert!(!Geometry { x: -50, y: -50 }.to_string().contains("+-"));
    }

    #[test]
    fn bottom_right_vertical_end_to_end_numbers() {
        let calc = GeometryCalculator::new(10, CenterPolicy::Origin);
        let mut label = Dimensions::new(40, 20);
        let placement = calc
            .resolve(&spec("bottom-right-vertical"), Dimensions::new(300, 200), &mut label)
            .expect("resolve");
        assert_eq!(placement.geometry, Geometry { x: 250, y: 170 });
        assert_eq!(placement.geometry.to_string(), "+250+170");
        assert!(placement.overflow.is_empty());
    }

    #[test]
    fn top_left_never_measures_label() {
        let calc = GeometryCalculator::new(30, CenterPolicy::Origin);
        let mut label = CountingLabel {
            dims: Dimensions::new(1, 1),
            calls: 0,
        };
        let placement = calc
            .resolve(&OrientationSpec::default(), Dimensions::new(10, 10), &mut label)
            .expect("resolve");
        assert_eq!(placement.geometry, Geometry { x: 30, y: 30 });
        assert_eq!(label.calls, 0);
    }

    #[test]
    fn overflow_is_reported_per_axis() {
        let calc = GeometryCalculator::new(30, CenterPolicy::Origin);
        let orientation = OrientationSpec {
            vertical: VerticalAnchor::Bottom,
            horizontal: HorizontalAnchor::Right,
            rotated: false,
        };
        let mut label = Dimensions::new(100, 100);
        let placement = calc
            .resolve(&orientation, Dimensions::new(200, 80), &mut label)
            .expect("resolve");
        assert_eq!(placement.geometry, Geometry { x: 70, y: -50 });
        assert_eq!(placement.overflow, vec![Axis::Vertical]);
    }

    #[test]
    fn resolve_is_deterministic() {
        let calc = GeometryCalculator::new(40, CenterPolicy::BoundingBox);
        let orientation = spec("m-r-v");
        let image = Dimensions::new(300, 200);
        let first = calc
            .resolve(&orientation, image, &mut Dimensions::new(50, 60))
            .expect("first");
        let second = calc
            .resolve(&orientation, image, &mut Dimensions::new(50, 60))
            .expect("second");
        assert_eq!(first, second);
    }
}
