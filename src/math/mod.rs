/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Geometric tolerance for constructing and validating geometry.
pub const TOLERANCE: f64 = 1e-10;

/// Tight equality tolerance used by the surface classifier and feature tests.
pub const EQ_TOLERANCE: f64 = 1e-13;

/// Inexact floating point comparison with [`EQ_TOLERANCE`].
#[must_use]
pub fn is_close(a: f64, b: f64) -> bool {
    is_close_within(a, b, EQ_TOLERANCE)
}

/// Inexact floating point comparison with an explicit tolerance.
#[must_use]
pub fn is_close_within(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Returns `true` if `dir` is parallel to the layering (Z) axis, either sense.
#[must_use]
pub fn is_layer_aligned(dir: &Vector3) -> bool {
    is_close(dir.x, 0.0) && is_close(dir.y, 0.0) && is_close(dir.z.abs(), 1.0)
}

/// Angle in radians between two vectors, in `[0, pi]`.
///
/// Uses `atan2(|a x b|, a . b)`, which stays accurate for nearly parallel vectors.
#[must_use]
pub fn angle_between(a: &Vector3, b: &Vector3) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}
