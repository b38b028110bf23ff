use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{orthonormal_frame, Surface, SurfaceDomain, FULL_TURN};

/// A toroidal surface.
///
/// `P(u, v) = center + (R + r * cos(v)) * radial(u) + r * sin(v) * axis`.
/// Like [`super::Sphere`], a torus face is never cuttable on flat stock.
#[derive(Debug, Clone)]
pub struct Torus {
    center: Point3,
    major_radius: f64,
    minor_radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Torus {
    /// Creates a new torus.
    ///
    /// # Errors
    ///
    /// Returns an error if either radius is non-positive, the minor radius is
    /// not smaller than the major radius, or the frame is degenerate.
    pub fn new(
        center: Point3,
        major_radius: f64,
        minor_radius: f64,
        axis: Vector3,
        ref_dir: Vector3,
    ) -> Result<Self> {
        if minor_radius < TOLERANCE || major_radius <= minor_radius {
            return Err(GeometryError::Degenerate(
                "torus radii must satisfy 0 < minor < major".into(),
            )
            .into());
        }
        let (axis, ref_dir) = orthonormal_frame(axis, ref_dir)?;
        Ok(Self {
            center,
            major_radius,
            minor_radius,
            axis,
            ref_dir,
        })
    }

    /// Returns the center of the torus.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the major radius (center to tube center).
    #[must_use]
    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    /// Returns the minor radius (tube radius).
    #[must_use]
    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    /// Returns the axis of symmetry (unit vector).
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

impl Surface for Torus {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        let r = self.major_radius + self.minor_radius * v.cos();
        Ok(self.center + self.radial(u) * r + self.axis * (self.minor_radius * v.sin()))
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        Ok(self.radial(u) * v.cos() + self.axis * v.sin())
    }

    fn inverse(&self, point: &Point3) -> Result<(f64, f64)> {
        let dp = point - self.center;
        let binormal = self.axis.cross(&self.ref_dir);
        let u = dp.dot(&binormal).atan2(dp.dot(&self.ref_dir));
        let radial = self.radial(u);
        let to_tube = dp - radial * self.major_radius;
        let v = to_tube.dot(&self.axis).atan2(to_tube.dot(&radial));
        Ok((u, v))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, FULL_TURN, 0.0, FULL_TURN)
    }

    fn u_period(&self) -> Option<f64> {
        Some(FULL_TURN)
    }
}
