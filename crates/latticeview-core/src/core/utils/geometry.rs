use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};

const ANTIPARALLEL_EPSILON: f64 = f64::EPSILON;

/// Returns the shortest-arc rotation taking the unit vector `from` onto the unit vector `to`.
///
/// Both inputs are expected to be normalized. Unlike [`UnitQuaternion::rotation_between`],
/// this never fails: for antiparallel inputs it picks a half-turn about an axis orthogonal
/// to `from`, chosen from the component of `from` with the largest magnitude among x and z.
pub fn rotation_between_unit_vectors(from: &Vector3<f64>, to: &Vector3<f64>) -> UnitQuaternion<f64> {
    let r = from.dot(to) + 1.0;

    let raw = if r < ANTIPARALLEL_EPSILON {
        if from.x.abs() > from.z.abs() {
            Quaternion::new(0.0, -from.y, from.x, 0.0)
        } else {
            Quaternion::new(0.0, 0.0, -from.z, from.y)
        }
    } else {
        let axis = from.cross(to);
        Quaternion::new(r, axis.x, axis.y, axis.z)
    };

    UnitQuaternion::new_normalize(raw)
}

/// Rotation taking the canonical +Y axis onto `direction`.
///
/// Cylinders and cones are modelled along +Y, so this orients them along an edge.
/// A zero-length direction yields the identity.
pub fn orientation_from_y(direction: &Vector3<f64>) -> UnitQuaternion<f64> {
    match direction.try_normalize(0.0) {
        Some(dir) => rotation_between_unit_vectors(&Vector3::y(), &dir),
        None => UnitQuaternion::identity(),
    }
}

/// Angle in radians between two vectors.
///
/// Returns `PI / 2` when either vector has zero length.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let denominator = (a.norm_squared() * b.norm_squared()).sqrt();
    if denominator == 0.0 {
        return std::f64::consts::FRAC_PI_2;
    }
    (a.dot(b) / denominator).clamp(-1.0, 1.0).acos()
}

/// Normalizes `v`, leaving zero-length vectors untouched.
pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

/// Builds a rotation from Euler angles (radians) applied in intrinsic X, Y, Z order.
///
/// The resulting rotation matrix is `Rx * Ry * Rz`.
pub fn rotation_from_euler_xyz(x: f64, y: f64, z: f64) -> UnitQuaternion<f64> {
    let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), x);
    let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y);
    let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z);
    rx * ry * rz
}

/// Rotation by `angle` radians about a (not necessarily normalized) axis.
pub fn rotation_about(axis: &Vector3<f64>, angle: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Unit::new_normalize(*axis), angle)
}
