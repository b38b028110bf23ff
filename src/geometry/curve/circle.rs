use crate::error::{GeometryError, Result};
use crate::geometry::surface::orthonormal_frame;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::Curve;

/// A circle in 3D space; edges use a parameter interval of it as an arc.
///
/// `P(t) = center + radius * cos(t) * ref_dir + radius * sin(t) * binormal`
/// where `binormal = normal x ref_dir`.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is zero-length,
    /// or the reference direction is not perpendicular to the normal.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("circle radius must be positive".into()).into(),
            );
        }
        let (normal, ref_dir) = orthonormal_frame(normal, ref_dir)?;
        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
        })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the normal vector of the circle plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the reference direction (t=0 direction).
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.ref_dir
    }

    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let (s, c) = t.sin_cos();
        Ok(self.center + (self.ref_dir * c + self.binormal() * s) * self.radius)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_reaches_binormal() {
        let c = Circle::new(Point3::new(0.0, 0.0, 2.0), 3.0, Vector3::z(), Vector3::x()).unwrap();
        let p = c.evaluate(FRAC_PI_2).unwrap();
        assert!((p - Point3::new(0.0, 3.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn zero_radius_fails() {
        assert!(Circle::new(Point3::origin(), 0.0, Vector3::z(), Vector3::x()).is_err());
    }
}
