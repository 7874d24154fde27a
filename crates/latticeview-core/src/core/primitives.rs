//! Renderer-facing geometry primitives.
//!
//! These records are all a renderer needs to draw the cell and its annotations:
//! plain line segments, dashed polylines, cylinders, cones and text billboards.
//! Cylinders and cones follow the usual mesh convention of being modelled along
//! the +Y axis and centered on their midpoint; `orientation` rotates +Y onto the
//! primitive's axis.

use crate::core::color::Color;
use crate::core::utils::geometry::orientation_from_y;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::Serialize;

/// Side length in pixels of the square texture a label is rasterized into.
pub const LABEL_TEXTURE_SIZE: u32 = 256;
/// Fraction of the texture height used by the glyphs.
pub const LABEL_FONT_FACTOR: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashPattern {
    pub dash_size: f64,
    pub gap_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    /// `None` draws a solid line.
    pub dash: Option<DashPattern>,
}

impl LineStyle {
    /// A dash pattern is only attached when either size is non-zero.
    pub fn new(color: Color, width: f64, dash_size: f64, gap_size: f64) -> Self {
        let dash = if dash_size == 0.0 && gap_size == 0.0 {
            None
        } else {
            Some(DashPattern {
                dash_size,
                gap_size,
            })
        };
        Self { color, width, dash }
    }

    pub fn solid(color: Color, width: f64) -> Self {
        Self::new(color, width, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSegment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl LineSegment {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vector3<f64> {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().norm()
    }
}

/// An open polyline, used for the angle arcs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<Point3<f64>>,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub color: Color,
    pub opacity: f64,
}

impl Material {
    pub fn opaque(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cylinder {
    pub center: Point3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub radius: f64,
    pub height: f64,
    pub radial_segments: u32,
    pub material: Material,
}

impl Cylinder {
    /// A cylinder spanning from `start` to `end`.
    pub fn between(
        start: Point3<f64>,
        end: Point3<f64>,
        radius: f64,
        radial_segments: u32,
        material: Material,
    ) -> Self {
        let direction = end - start;
        Self {
            center: start + direction * 0.5,
            orientation: orientation_from_y(&direction),
            radius,
            height: direction.norm(),
            radial_segments,
            material,
        }
    }

    pub fn axis(&self) -> Vector3<f64> {
        self.orientation * Vector3::y()
    }

    pub fn start(&self) -> Point3<f64> {
        self.center - self.axis() * (self.height * 0.5)
    }

    pub fn end(&self) -> Point3<f64> {
        self.center + self.axis() * (self.height * 0.5)
    }
}

/// A cone whose base is centered at `center - axis * height / 2` and whose apex
/// points along the oriented +Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cone {
    pub center: Point3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub base_radius: f64,
    pub height: f64,
    pub radial_segments: u32,
    pub material: Material,
}

impl Cone {
    pub fn axis(&self) -> Vector3<f64> {
        self.orientation * Vector3::y()
    }

    pub fn apex(&self) -> Point3<f64> {
        self.center + self.axis() * (self.height * 0.5)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

/// A fixed-size text billboard.
///
/// `size` is the sprite scale along both screen axes; `center` is the anchor inside
/// the sprite, `(0.5, 0.5)` being the middle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSprite {
    pub position: Point3<f64>,
    pub text: String,
    pub color: Color,
    pub font: String,
    pub size: f64,
    pub stroke: Option<Stroke>,
    pub center: [f64; 2],
}

impl LabelSprite {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Point3<f64>,
        text: impl Into<String>,
        color: Color,
        font: impl Into<String>,
        size: f64,
        offset: [f64; 2],
        stroke_width: f64,
        stroke_color: Color,
    ) -> Self {
        let stroke = (stroke_width > 0.0).then(|| Stroke {
            width: stroke_width,
            color: stroke_color,
        });
        Self {
            position,
            text: text.into(),
            color,
            font: font.into(),
            size,
            stroke,
            center: [offset[0] + 0.5, offset[1] + 0.5],
        }
    }

    pub fn font_px(&self) -> f64 {
        LABEL_FONT_FACTOR * LABEL_TEXTURE_SIZE as f64
    }

    /// Outline width in texture pixels, zero when the label has no stroke.
    pub fn stroke_px(&self) -> f64 {
        self.stroke
            .as_ref()
            .map_or(0.0, |s| s.width * LABEL_TEXTURE_SIZE as f64)
    }

    /// CSS-style font shorthand used when rasterizing the label texture.
    pub fn canvas_font(&self) -> String {
        format!("{}px {}", self.font_px(), self.font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    #[test]
    fn line_style_without_dash_sizes_is_solid() {
        assert!(LineStyle::new(Color::BLACK, 1.0, 0.0, 0.0).dash.is_none());
        let dashed = LineStyle::new(Color::BLACK, 2.0, 0.2, 0.0);
        assert_eq!(
            dashed.dash,
            Some(DashPattern {
                dash_size: 0.2,
                gap_size: 0.0
            })
        );
    }

    #[test]
    fn cylinder_between_points_recovers_its_endpoints() {
        let start = Point3::new(1.0, 1.0, 1.0);
        let end = Point3::new(1.0, 4.0, 5.0);
        let cylinder = Cylinder::between(start, end, 0.09, 10, Material::opaque(Color::BLACK));
        assert!((cylinder.height - 5.0).abs() < TOLERANCE);
        assert!((cylinder.start() - start).norm() < TOLERANCE);
        assert!((cylinder.end() - end).norm() < TOLERANCE);
    }

    #[test]
    fn label_without_stroke_width_has_no_outline() {
        let label = LabelSprite::new(
            Point3::origin(),
            "a",
            Color::BLACK,
            "Arial",
            0.7,
            [0.0, 0.0],
            0.0,
            Color::BLACK,
        );
        assert!(label.stroke.is_none());
        assert_eq!(label.stroke_px(), 0.0);
        assert_eq!(label.center, [0.5, 0.5]);
    }

    #[test]
    fn label_raster_parameters_scale_with_texture_size() {
        let label = LabelSprite::new(
            Point3::origin(),
            "α",
            Color::WHITE,
            "Arial",
            0.7,
            [0.0, 0.0],
            0.06,
            Color::BLACK,
        );
        assert!((label.stroke_px() - 15.36).abs() < TOLERANCE);
        assert_eq!(label.canvas_font(), "230.4px Arial");
    }
}
