use crate::core::color::Color;
use crate::core::models::lattice::{BasisLabel, BasisSet, CollapsedFlags, Periodicity};
use crate::core::primitives::{Cone, Cylinder, LabelSprite, LineStyle, Material, Polyline};
use crate::core::style::{LatticeLabelStyle, LatticeParameter, ResolvedLabelStyle};
use crate::core::utils::geometry::{
    angle_between, normalize_or_zero, orientation_from_y, rotation_about,
    rotation_between_unit_vectors,
};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use serde::Serialize;
use tracing::{debug, trace};

/// Distance the guide line and arrowhead extend beyond a basis vector.
pub const AXIS_OVERHANG: f64 = 1.3;
pub const AXIS_LABEL_OFFSET: f64 = 0.8;
pub const AXIS_SHAFT_RADIUS: f64 = 0.09;
pub const AXIS_SHAFT_OPACITY: f64 = 0.75;
pub const AXIS_GUIDE_RADIUS: f64 = 0.02;
pub const AXIS_SEGMENTS: u32 = 10;
pub const ARROWHEAD_RADIUS: f64 = 0.10;
pub const ARROWHEAD_HEIGHT: f64 = 0.5;
pub const ARROWHEAD_SEGMENTS: u32 = 12;

pub const ARC_SEGMENTS: usize = 20;
pub const ARC_MIN_RADIUS: f64 = 1.0;
pub const ARC_MAX_RADIUS: f64 = 5.0;
pub const ARC_LABEL_OFFSET: f64 = 0.3;
pub const ARC_LINE_WIDTH: f64 = 2.0;
pub const ARC_DASH_SIZE: f64 = 0.2;
pub const ARC_GAP_SIZE: f64 = 0.1;

/// Arrow and label for one basis vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisAnnotation {
    pub axis: BasisLabel,
    pub label: LabelSprite,
    /// Colored, semi-transparent cylinder covering the basis vector.
    pub shaft: Cylinder,
    /// Thin black line running past the end of the vector.
    pub guide: Cylinder,
    pub arrowhead: Cone,
}

/// Dashed arc and label for the angle between two consecutive basis vectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngleAnnotation {
    pub parameter: LatticeParameter,
    pub between: [BasisLabel; 2],
    pub degrees: f64,
    pub radius: f64,
    /// Rotation placing the canonical arc (in the local XY plane, starting on +X)
    /// into the plane of the two basis vectors.
    pub orientation: UnitQuaternion<f64>,
    pub arc: Polyline,
    pub label: LabelSprite,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatticeAnnotations {
    /// The periodic axes spanning the primary periodic line or plane, if any.
    pub primary_plane: Vec<BasisLabel>,
    pub axes: Vec<AxisAnnotation>,
    pub angles: Vec<AngleAnnotation>,
}

impl LatticeAnnotations {
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty() && self.angles.is_empty()
    }
}

/// Finds the first 1D or 2D periodic arrangement when walking the axes cyclically.
///
/// Returns one axis for a single periodic direction, two consecutive axes for a
/// periodic plane, and nothing for fully periodic or non-periodic systems.
pub fn primary_periodic_plane(periodicity: Periodicity) -> Vec<BasisLabel> {
    for dim in 0..3 {
        let p1 = periodicity.is_periodic(dim);
        let p2 = periodicity.is_periodic((dim + 1) % 3);
        let p3 = periodicity.is_periodic((dim + 2) % 3);
        if p1 && !p2 && !p3 {
            return vec![BasisLabel::from_index(dim)];
        }
        if p1 && p2 && !p3 {
            return vec![BasisLabel::from_index(dim), BasisLabel::from_index(dim + 1)];
        }
    }
    Vec::new()
}

/// Builds the axis arrows and angle arcs annotating a cell's lattice constants.
///
/// Axes start at the first axis of the primary periodic plane; the content of the
/// result does not depend on that order. Collapsed vectors get no arrow and take
/// part in no angle.
pub fn build_lattice_annotations(
    basis: &BasisSet,
    periodicity: Periodicity,
    collapsed: CollapsedFlags,
    style: &LatticeLabelStyle,
) -> LatticeAnnotations {
    let primary_plane = primary_periodic_plane(periodicity);
    let start = primary_plane.first().map_or(0, |label| label.index());

    let mut annotations = LatticeAnnotations {
        primary_plane,
        ..LatticeAnnotations::default()
    };

    for offset in 0..3 {
        let i = (start + offset) % 3;
        let label = BasisLabel::from_index(i);

        let axis_style = style.resolve(LatticeParameter::axis(label));
        if axis_style.enabled && !collapsed.is_collapsed(i) {
            annotations
                .axes
                .push(build_axis(basis, collapsed, i, &axis_style));
        }

        let parameter = LatticeParameter::angle_after(label);
        let angle_style = style.resolve(parameter);
        if angle_style.enabled && !collapsed.is_collapsed(i) && !collapsed.is_collapsed(i + 1) {
            annotations
                .angles
                .push(build_angle(basis, i, parameter, &angle_style));
        }
    }

    debug!(
        axes = annotations.axes.len(),
        angles = annotations.angles.len(),
        "Built lattice annotations."
    );
    annotations
}

/// Direction in which the label of basis vector `i` is pushed off its midpoint.
///
/// Points away from the neighbouring vectors, falling back to a normal against
/// the fixed +Z axis when both neighbours are collapsed.
fn axis_label_direction(basis: &BasisSet, collapsed: CollapsedFlags, i: usize) -> Vector3<f64> {
    let v1 = basis.cyclic(i);
    let v2 = basis.cyclic(i + 1);
    let v3 = basis.cyclic(i + 2);

    let offset = match (collapsed.is_collapsed(i + 1), collapsed.is_collapsed(i + 2)) {
        (true, true) => v1.cross(&Vector3::z()),
        (true, false) => v1.cross(&v1.cross(v3)),
        (false, true) => v1.cross(&v1.cross(v2)),
        (false, false) => v1.cross(v3) - v1.cross(v2),
    };
    normalize_or_zero(&offset)
}

fn label_sprite(position: Point3<f64>, style: &ResolvedLabelStyle) -> LabelSprite {
    LabelSprite::new(
        position,
        style.label.clone(),
        style.color,
        style.font.clone(),
        style.size,
        [0.0, 0.0],
        style.stroke_width,
        style.stroke_color,
    )
}

fn build_axis(
    basis: &BasisSet,
    collapsed: CollapsedFlags,
    i: usize,
    style: &ResolvedLabelStyle,
) -> AxisAnnotation {
    let v = basis.cyclic(i);
    let origin = Point3::origin();

    let label_position =
        Point3::from(v * 0.5 + axis_label_direction(basis, collapsed, i) * AXIS_LABEL_OFFSET);
    let tip = Point3::from(v * (1.0 + AXIS_OVERHANG / v.norm()));

    trace!(axis = i, "Building axis arrow.");
    AxisAnnotation {
        axis: BasisLabel::from_index(i),
        label: label_sprite(label_position, style),
        shaft: Cylinder::between(
            origin,
            Point3::from(*v),
            AXIS_SHAFT_RADIUS,
            AXIS_SEGMENTS,
            Material {
                color: style.color,
                opacity: AXIS_SHAFT_OPACITY,
            },
        ),
        guide: Cylinder::between(
            origin,
            tip,
            AXIS_GUIDE_RADIUS,
            AXIS_SEGMENTS,
            Material::opaque(Color::BLACK),
        ),
        arrowhead: Cone {
            center: tip,
            orientation: orientation_from_y(v),
            base_radius: ARROWHEAD_RADIUS,
            height: ARROWHEAD_HEIGHT,
            radial_segments: ARROWHEAD_SEGMENTS,
            material: Material::opaque(Color::BLACK),
        },
    }
}

/// Radius of the arc drawn between `v1` and `v2`.
pub fn arc_radius(v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    (v1.norm() / 6.0)
        .min(v2.norm() / 6.0)
        .min(ARC_MAX_RADIUS)
        .max(ARC_MIN_RADIUS)
}

/// Rotation taking the local arc frame onto the plane of `v1` and `v2`.
///
/// The local +X axis is first turned onto `v1`, then the arc is spun about that
/// axis until its end point falls on the same side of `v1` as `v2`.
fn arc_orientation(v1: &Vector3<f64>, v2: &Vector3<f64>, last_local: &Point3<f64>) -> UnitQuaternion<f64> {
    let onto_first = rotation_between_unit_vectors(&Vector3::x(), &v1.normalize());
    let last_world = onto_first * last_local.coords;

    let arc_normal = v1.cross(&last_world);
    let normal = v1.cross(v2);
    let mut plane_angle = angle_between(&normal, &arc_normal);
    if v2.cross(&last_world).dot(v1) > 0.0 {
        plane_angle = -plane_angle;
    }

    onto_first * rotation_about(&Vector3::x(), plane_angle)
}

fn build_angle(
    basis: &BasisSet,
    i: usize,
    parameter: LatticeParameter,
    style: &ResolvedLabelStyle,
) -> AngleAnnotation {
    let v1 = basis.cyclic(i);
    let v2 = basis.cyclic(i + 1);

    let angle = angle_between(v1, v2);
    let radius = arc_radius(v1, v2);

    let local: Vec<Point3<f64>> = (0..=ARC_SEGMENTS)
        .map(|k| {
            let t = angle * k as f64 / ARC_SEGMENTS as f64;
            Point3::new(radius * t.cos(), radius * t.sin(), 0.0)
        })
        .collect();

    let orientation = arc_orientation(v1, v2, &local[ARC_SEGMENTS]);
    let points: Vec<Point3<f64>> = local.iter().map(|p| orientation * p).collect();

    let midpoint = points[ARC_SEGMENTS / 2];
    let distance = midpoint.coords.norm();
    let label_position = if distance > 0.0 {
        midpoint * (1.0 + ARC_LABEL_OFFSET / distance)
    } else {
        midpoint
    };

    AngleAnnotation {
        parameter,
        between: [BasisLabel::from_index(i), BasisLabel::from_index(i + 1)],
        degrees: angle.to_degrees(),
        radius,
        orientation,
        arc: Polyline {
            points,
            style: LineStyle::new(Color::BLACK, ARC_LINE_WIDTH, ARC_DASH_SIZE, ARC_GAP_SIZE),
        },
        label: label_sprite(label_position, style),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn cubic(length: f64) -> BasisSet {
        BasisSet::from_rows([
            [length, 0.0, 0.0],
            [0.0, length, 0.0],
            [0.0, 0.0, length],
        ])
    }

    fn triclinic() -> BasisSet {
        BasisSet::from_rows([[4.1, 0.3, -0.2], [1.2, 5.0, 0.4], [-0.7, 0.9, 6.3]])
    }

    fn build(basis: &BasisSet, periodicity: Periodicity) -> LatticeAnnotations {
        build_lattice_annotations(
            basis,
            periodicity,
            basis.collapsed(1e-8),
            &LatticeLabelStyle::default(),
        )
    }

    fn angle(annotations: &LatticeAnnotations, parameter: LatticeParameter) -> &AngleAnnotation {
        annotations
            .angles
            .iter()
            .find(|a| a.parameter == parameter)
            .expect("angle annotation present")
    }

    fn parallel(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        a.cross(b).norm() < TOLERANCE * a.norm() * b.norm() && a.dot(b) > 0.0
    }

    #[test]
    fn primary_plane_detects_slabs_and_wires() {
        assert_eq!(
            primary_periodic_plane(Periodicity([true, true, false])),
            vec![BasisLabel::A, BasisLabel::B]
        );
        assert_eq!(
            primary_periodic_plane(Periodicity([true, false, true])),
            vec![BasisLabel::C, BasisLabel::A]
        );
        assert_eq!(
            primary_periodic_plane(Periodicity([false, true, false])),
            vec![BasisLabel::B]
        );
        assert!(primary_periodic_plane(Periodicity::FULL).is_empty());
        assert!(primary_periodic_plane(Periodicity::NONE).is_empty());
    }

    #[test]
    fn full_cell_gets_three_axes_and_three_angles() {
        let annotations = build(&triclinic(), Periodicity::FULL);
        assert_eq!(annotations.axes.len(), 3);
        assert_eq!(annotations.angles.len(), 3);
    }

    #[test]
    fn angle_pairs_map_to_opposite_angle_labels() {
        let annotations = build(&cubic(3.0), Periodicity::FULL);
        let gamma = angle(&annotations, LatticeParameter::Gamma);
        assert_eq!(gamma.between, [BasisLabel::A, BasisLabel::B]);
        assert_eq!(gamma.label.text, "γ");
        assert_eq!(gamma.label.color, Color::WHITE);

        let alpha = angle(&annotations, LatticeParameter::Alpha);
        assert_eq!(alpha.between, [BasisLabel::B, BasisLabel::C]);
        let beta = angle(&annotations, LatticeParameter::Beta);
        assert_eq!(beta.between, [BasisLabel::C, BasisLabel::A]);
    }

    #[test]
    fn cubic_angles_are_right_angles() {
        let annotations = build(&cubic(3.0), Periodicity::FULL);
        for annotation in &annotations.angles {
            assert!((annotation.degrees - 90.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn arcs_span_from_first_to_second_vector_in_their_plane() {
        let basis = triclinic();
        let annotations = build(&basis, Periodicity::FULL);
        for annotation in &annotations.angles {
            let v1 = basis.get(annotation.between[0]);
            let v2 = basis.get(annotation.between[1]);
            let normal = v1.cross(v2).normalize();
            let points = &annotation.arc.points;

            assert_eq!(points.len(), ARC_SEGMENTS + 1);
            assert!(parallel(&points[0].coords, v1));
            assert!(parallel(&points[ARC_SEGMENTS].coords, v2));
            for p in points {
                assert!(p.coords.dot(&normal).abs() < TOLERANCE);
                assert!((p.coords.norm() - annotation.radius).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn arc_radius_is_clamped() {
        assert_eq!(arc_radius(&Vector3::new(3.0, 0.0, 0.0), &Vector3::y()), 1.0);
        assert!((arc_radius(&Vector3::new(12.0, 0.0, 0.0), &Vector3::new(0.0, 9.0, 0.0)) - 1.5).abs() < TOLERANCE);
        assert_eq!(arc_radius(&Vector3::new(60.0, 0.0, 0.0), &Vector3::new(0.0, 90.0, 0.0)), 5.0);
    }

    #[test]
    fn angle_label_sits_outside_the_arc_midpoint() {
        let annotations = build(&cubic(3.0), Periodicity::FULL);
        let gamma = angle(&annotations, LatticeParameter::Gamma);
        // Point ARC_SEGMENTS / 2 halves the 90° arc, so the label sits on the 45° diagonal.
        let midpoint = gamma.arc.points[ARC_SEGMENTS / 2];
        assert!((midpoint - Point3::new(1.0, 1.0, 0.0) * std::f64::consts::FRAC_1_SQRT_2).norm() < TOLERANCE);
        let expected = (1.0 + ARC_LABEL_OFFSET) * std::f64::consts::FRAC_1_SQRT_2;
        assert!((gamma.label.position - Point3::new(expected, expected, 0.0)).norm() < TOLERANCE);
        assert_eq!(gamma.arc.style.dash.map(|d| d.dash_size), Some(ARC_DASH_SIZE));
    }

    #[test]
    fn axis_arrow_geometry_follows_the_basis_vector() {
        let basis = cubic(4.0);
        let annotations = build(&basis, Periodicity::FULL);
        let a = annotations
            .axes
            .iter()
            .find(|axis| axis.axis == BasisLabel::A)
            .unwrap();

        assert!((a.shaft.end() - Point3::new(4.0, 0.0, 0.0)).norm() < TOLERANCE);
        assert_eq!(a.shaft.material.opacity, AXIS_SHAFT_OPACITY);
        assert_eq!(a.shaft.material.color, Color::from_hex(0xc52929));
        assert!((a.guide.end() - Point3::new(5.3, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((a.arrowhead.center - Point3::new(5.3, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((a.arrowhead.axis() - Vector3::x()).norm() < TOLERANCE);
        assert_eq!(a.label.text, "a");
    }

    #[test]
    fn axis_label_is_pushed_away_from_the_other_vectors() {
        let annotations = build(&cubic(2.0), Periodicity::FULL);
        let a = annotations
            .axes
            .iter()
            .find(|axis| axis.axis == BasisLabel::A)
            .unwrap();
        // a × c − a × b = (0, -4, -4), normalized and scaled by 0.8.
        let d = AXIS_LABEL_OFFSET * std::f64::consts::FRAC_1_SQRT_2;
        assert!((a.label.position - Point3::new(1.0, -d, -d)).norm() < TOLERANCE);
    }

    #[test]
    fn isolated_axis_label_falls_back_to_fixed_normal() {
        let basis = BasisSet::new(Vector3::new(2.0, 0.0, 0.0), Vector3::zeros(), Vector3::zeros());
        let annotations = build(&basis, Periodicity([true, false, false]));
        assert_eq!(annotations.axes.len(), 1);
        assert!(annotations.angles.is_empty());
        // a × z = (0, -2, 0)
        let label = &annotations.axes[0].label;
        assert!((label.position - Point3::new(1.0, -0.8, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn slab_skips_collapsed_axis_and_its_angles() {
        let basis = BasisSet::new(
            Vector3::new(3.0, 0.0, 0.0),
            Vector3::new(1.0, 3.0, 0.0),
            Vector3::zeros(),
        );
        let annotations = build(&basis, Periodicity([true, true, false]));
        assert_eq!(annotations.primary_plane, vec![BasisLabel::A, BasisLabel::B]);
        assert_eq!(annotations.axes.len(), 2);
        assert_eq!(annotations.angles.len(), 1);
        assert_eq!(annotations.angles[0].parameter, LatticeParameter::Gamma);

        let b = annotations
            .axes
            .iter()
            .find(|axis| axis.axis == BasisLabel::B)
            .unwrap();
        // b's next neighbour (c) is collapsed: offset = b × (b × a), which lies in the slab plane.
        assert!(b.label.position.z.abs() < TOLERANCE);
    }

    #[test]
    fn disabled_parameters_are_not_emitted() {
        let mut style = LatticeLabelStyle::default();
        style.a.enabled = Some(false);
        style.gamma.enabled = Some(false);
        let basis = cubic(3.0);
        let annotations =
            build_lattice_annotations(&basis, Periodicity::FULL, CollapsedFlags::NONE, &style);
        assert_eq!(annotations.axes.len(), 2);
        assert_eq!(annotations.angles.len(), 2);
        assert!(annotations.axes.iter().all(|axis| axis.axis != BasisLabel::A));
    }

    #[test]
    fn iteration_order_does_not_change_content() {
        let basis = triclinic();
        let full = build(&basis, Periodicity::FULL);
        let slab = build(&basis, Periodicity([false, true, true]));
        assert_eq!(slab.axes.first().map(|a| a.axis), Some(BasisLabel::B));

        for axis in &full.axes {
            assert!(slab.axes.contains(axis));
        }
        for annotation in &full.angles {
            assert!(slab.angles.contains(annotation));
        }
    }
}
