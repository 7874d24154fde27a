use super::config::{Alignment, ViewConfig};
use super::error::EngineError;
use crate::core::models::lattice::BasisSet;
use crate::core::utils::geometry::{rotation_between_unit_vectors, rotation_from_euler_xyz};
use nalgebra::{UnitQuaternion, Vector3};
use tracing::{debug, trace};

pub const MAX_ALIGNMENTS: usize = 2;
/// Below this length a constrained basis vector contributes no rotation.
pub const ALIGNMENT_EPSILON: f64 = 1e-8;

/// State carried from one alignment constraint to the next.
#[derive(Debug, Clone, Copy)]
struct AlignmentState {
    rotation: UnitQuaternion<f64>,
    locked: [bool; 3],
    directions: [Vector3<f64>; 3],
}

impl AlignmentState {
    fn new(basis: &BasisSet) -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            locked: [false; 3],
            directions: *basis.vectors(),
        }
    }

    fn apply(self, alignment: &Alignment) -> Self {
        let mut source = self.directions[alignment.target.index()];
        for (axis, locked) in self.locked.iter().enumerate() {
            if *locked {
                source[axis] = 0.0;
            }
        }

        let length = source.norm();
        if length <= ALIGNMENT_EPSILON {
            trace!(
                alignment = %alignment,
                "Constrained vector is degenerate, skipping alignment."
            );
            return self;
        }

        let step = rotation_between_unit_vectors(&(source / length), &alignment.direction.target());
        let mut locked = self.locked;
        locked[alignment.direction.locked_axis()] = true;

        Self {
            rotation: step * self.rotation,
            locked,
            directions: self.directions.map(|d| step * d),
        }
    }
}

/// Computes the rotation that satisfies up to two alignment constraints in order.
///
/// Each constraint rotates the current (already rotated) basis vector onto its view
/// direction, after projecting out the view axes locked by earlier constraints, so a
/// later constraint never undoes an earlier one. Degenerate vectors are skipped.
///
/// # Errors
///
/// Returns [`EngineError::TooManyAlignments`] when more than two constraints are given.
pub fn solve_alignment(
    alignments: &[Alignment],
    basis: &BasisSet,
) -> Result<UnitQuaternion<f64>, EngineError> {
    if alignments.len() > MAX_ALIGNMENTS {
        return Err(EngineError::TooManyAlignments {
            count: alignments.len(),
        });
    }

    let state = alignments
        .iter()
        .fold(AlignmentState::new(basis), AlignmentState::apply);
    Ok(state.rotation)
}

/// The camera orientation for a structure: the basis alignment followed by the
/// configured extra rotations.
///
/// Structures without a cell start from the identity. Every extra rotation
/// `[rx, ry, rz]` is given in degrees and applied with negated angles in XYZ order.
pub fn compute_view_orientation(
    basis: Option<&BasisSet>,
    view: &ViewConfig,
) -> Result<UnitQuaternion<f64>, EngineError> {
    let aligned = match basis {
        Some(basis) => solve_alignment(&view.alignments, basis)?,
        None => {
            if view.alignments.len() > MAX_ALIGNMENTS {
                return Err(EngineError::TooManyAlignments {
                    count: view.alignments.len(),
                });
            }
            UnitQuaternion::identity()
        }
    };

    let orientation = view.rotations.iter().fold(aligned, |acc, [rx, ry, rz]| {
        rotation_from_euler_xyz(-rx.to_radians(), -ry.to_radians(), -rz.to_radians()) * acc
    });

    debug!(
        angle = orientation.angle().to_degrees(),
        rotations = view.rotations.len(),
        "Computed view orientation."
    );
    Ok(orientation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::lattice::BasisLabel;
    use crate::engine::config::ViewDirection;

    const TOLERANCE: f64 = 1e-9;

    fn cubic() -> BasisSet {
        BasisSet::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    fn triclinic() -> BasisSet {
        BasisSet::from_rows([[4.1, 0.3, -0.2], [1.2, 5.0, 0.4], [-0.7, 0.9, 6.3]])
    }

    fn align(direction: ViewDirection, target: BasisLabel) -> Alignment {
        Alignment::new(direction, target)
    }

    fn assert_vec_near(actual: &Vector3<f64>, expected: &Vector3<f64>) {
        assert!(
            (actual - expected).norm() < TOLERANCE,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    const DIRECTIONS: [ViewDirection; 6] = [
        ViewDirection::Up,
        ViewDirection::Down,
        ViewDirection::Left,
        ViewDirection::Right,
        ViewDirection::Front,
        ViewDirection::Back,
    ];

    #[test]
    fn up_c_rotates_c_onto_positive_y() {
        let q = solve_alignment(&[align(ViewDirection::Up, BasisLabel::C)], &cubic()).unwrap();
        assert_vec_near(&(q * Vector3::z()), &Vector3::y());
    }

    #[test]
    fn empty_alignment_is_identity() {
        let q = solve_alignment(&[], &triclinic()).unwrap();
        assert!(q.angle() < TOLERANCE);
    }

    #[test]
    fn single_constraint_maps_target_onto_direction_for_every_pair() {
        let basis = triclinic();
        for direction in DIRECTIONS {
            for label in BasisLabel::ALL {
                let q = solve_alignment(&[align(direction, label)], &basis).unwrap();
                let rotated = (q * basis.get(label)).normalize();
                assert!((q.quaternion().norm() - 1.0).abs() < TOLERANCE);
                assert_vec_near(&rotated, &direction.target());
            }
        }
    }

    #[test]
    fn second_constraint_keeps_the_first_locked_axis() {
        let basis = triclinic();
        let first = align(ViewDirection::Up, BasisLabel::C);
        let second = align(ViewDirection::Right, BasisLabel::A);

        let q1 = solve_alignment(&[first], &basis).unwrap();
        let q12 = solve_alignment(&[first, second], &basis).unwrap();

        let c_after_first = q1 * basis.c();
        let c_after_both = q12 * basis.c();
        assert!((c_after_first.y - c_after_both.y).abs() < TOLERANCE);
        assert_vec_near(&c_after_both.normalize(), &Vector3::y());

        let a_after_both = q12 * basis.a();
        let in_plane = Vector3::new(a_after_both.x, 0.0, a_after_both.z).normalize();
        assert_vec_near(&in_plane, &ViewDirection::Right.target());
    }

    #[test]
    fn default_cubic_alignment_puts_c_up_and_a_right() {
        let q = solve_alignment(&ViewConfig::default().alignments, &cubic()).unwrap();
        assert_vec_near(&(q * Vector3::z()), &Vector3::new(0.0, 1.0, 0.0));
        assert_vec_near(&(q * Vector3::x()), &Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn three_constraints_are_rejected() {
        let alignments = [
            align(ViewDirection::Up, BasisLabel::C),
            align(ViewDirection::Right, BasisLabel::A),
            align(ViewDirection::Front, BasisLabel::B),
        ];
        let err = solve_alignment(&alignments, &cubic()).unwrap_err();
        assert!(matches!(err, EngineError::TooManyAlignments { count: 3 }));
    }

    #[test]
    fn collapsed_target_contributes_no_rotation() {
        let basis = BasisSet::new(Vector3::x(), Vector3::y(), Vector3::zeros());
        let q = solve_alignment(&[align(ViewDirection::Up, BasisLabel::C)], &basis).unwrap();
        assert!(q.angle() < TOLERANCE);
    }

    #[test]
    fn constraint_parallel_to_a_locked_axis_is_skipped() {
        let first = align(ViewDirection::Up, BasisLabel::C);
        let second = align(ViewDirection::Down, BasisLabel::C);
        let q1 = solve_alignment(&[first], &cubic()).unwrap();
        let q12 = solve_alignment(&[first, second], &cubic()).unwrap();
        assert!(q1.angle_to(&q12) < TOLERANCE);
    }

    #[test]
    fn view_orientation_without_basis_applies_negated_rotations() {
        let view = ViewConfig {
            alignments: Vec::new(),
            rotations: vec![[0.0, 90.0, 0.0]],
        };
        let q = compute_view_orientation(None, &view).unwrap();
        assert_vec_near(&(q * Vector3::x()), &Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn view_orientation_applies_rotations_after_alignment() {
        let view = ViewConfig {
            alignments: vec![align(ViewDirection::Up, BasisLabel::C)],
            rotations: vec![[90.0, 0.0, 0.0]],
        };
        let q = compute_view_orientation(Some(&cubic()), &view).unwrap();
        // c goes up, then the -90 degree turn about x takes +Y to -Z.
        assert_vec_near(&(q * Vector3::z()), &Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn view_orientation_rejects_too_many_alignments_even_without_basis() {
        let view = ViewConfig {
            alignments: vec![align(ViewDirection::Up, BasisLabel::C); 3],
            rotations: Vec::new(),
        };
        assert!(compute_view_orientation(None, &view).is_err());
    }
}
