use std::f64::consts::FRAC_PI_2;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{orthonormal_frame, Surface, SurfaceDomain, FULL_TURN};

/// A spherical surface.
///
/// `P(u, v) = center + r * (cos(v) * radial(u) + sin(v) * axis)`, with `u` the
/// longitude and `v` the latitude. Never cuttable on flat stock; faces on a
/// sphere only need to load, bound and classify.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or the frame is degenerate.
    pub fn new(center: Point3, radius: f64, axis: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("sphere radius must be positive".into()).into(),
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

    /// Returns the center of the sphere.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the polar axis (unit vector).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the reference direction (u=0 on the equator).
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.ref_dir
    }

    fn direction(&self, u: f64, v: f64) -> Vector3 {
        let binormal = self.axis.cross(&self.ref_dir);
        let radial = self.ref_dir * u.cos() + binormal * u.sin();
        radial * v.cos() + self.axis * v.sin()
    }
}

impl Surface for Sphere {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.center + self.direction(u, v) * self.radius)
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        Ok(self.direction(u, v))
    }

    fn inverse(&self, point: &Point3) -> Result<(f64, f64)> {
        let dp = point - self.center;
        let len = dp.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("point is at the sphere center".into()).into());
        }
        let dp = dp / len;
        let binormal = self.axis.cross(&self.ref_dir);
        let v = dp.dot(&self.axis).clamp(-1.0, 1.0).asin();
        let u = dp.dot(&binormal).atan2(dp.dot(&self.ref_dir));
        Ok((u, v))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, FULL_TURN, -FRAC_PI_2, FRAC_PI_2)
    }

    fn u_period(&self) -> Option<f64> {
        Some(FULL_TURN)
    }
}
