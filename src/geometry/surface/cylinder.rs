use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{orthonormal_frame, Surface, SurfaceDomain, FULL_TURN};

/// A cylindrical surface.
///
/// `P(u, v) = center + radius * radial(u) + v * axis`, where
/// `radial(u) = cos(u) * ref_dir + sin(u) * (axis x ref_dir)`. The natural
/// normal is `radial(u)`, pointing away from the axis; hole walls reverse it
/// at the face level.
#[derive(Debug, Clone)]
pub struct Cylinder {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Cylinder {
    /// Creates a new cylinder from a point on its axis.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the frame is degenerate.
    pub fn new(center: Point3, radius: f64, axis: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("cylinder radius must be positive".into()).into(),
            );
        }
        let (axis, ref_dir) = orthonormal_frame(axis, ref_dir)?;
        Ok(Self {
            center,
            radius,
            axis,
            ref_dir,
        })
    }

    /// Returns the point on the axis at `v = 0`.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the axis direction (unit vector).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the reference direction (u=0).
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.ref_dir
    }

    fn radial(&self, u: f64) -> Vector3 {
        let binormal = self.axis.cross(&self.ref_dir);
        self.ref_dir * u.cos() + binormal * u.sin()
    }
}

impl Surface for Cylinder {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.center + self.radial(u) * self.radius + self.axis * v)
    }

    fn normal(&self, u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.radial(u))
    }

    /// `u` comes back in `(-pi, pi]`; callers wrap it into the face domain.
    fn inverse(&self, point: &Point3) -> Result<(f64, f64)> {
        let dp = point - self.center;
        let binormal = self.axis.cross(&self.ref_dir);
        let u = dp.dot(&binormal).atan2(dp.dot(&self.ref_dir));
        Ok((u, dp.dot(&self.axis)))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, FULL_TURN, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn u_period(&self) -> Option<f64> {
        Some(FULL_TURN)
    }
}
