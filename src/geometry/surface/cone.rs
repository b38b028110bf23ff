use std::f64::consts::FRAC_PI_2;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{orthonormal_frame, Surface, SurfaceDomain, FULL_TURN};

/// A conical surface: the flank of a countersink or a drafted boss.
///
/// `P(u, v) = center + (radius + v * sin(alpha)) * radial(u) + v * cos(alpha) * axis`
/// where `radial(u) = cos(u) * ref_dir + sin(u) * binormal`, `binormal = axis x ref_dir`
/// and `alpha` is the half-angle. A positive half-angle widens along the axis.
///
/// `v` is the distance along the generator from the reference circle.
#[derive(Debug, Clone)]
pub struct Cone {
    center: Point3,
    radius: f64,
    axis: Vector3,
    half_angle: f64,
    ref_dir: Vector3,
}

impl Cone {
    /// Creates a new cone from its reference circle and signed half-angle.
    ///
    /// A radius of zero puts the apex at `center`.
    ///
    /// # Errors
    ///
    /// Returns an error if `|half_angle|` is not strictly between zero and a
    /// right angle, the radius is negative, or the frame is degenerate.
    pub fn new(
        center: Point3,
        radius: f64,
        axis: Vector3,
        half_angle: f64,
        ref_dir: Vector3,
    ) -> Result<Self> {
        if !(TOLERANCE..FRAC_PI_2 - TOLERANCE).contains(&half_angle.abs()) {
            return Err(GeometryError::Degenerate(
                "cone half-angle must satisfy 0 < |alpha| < pi/2".into(),
            )
            .into());
        }
        if radius < 0.0 {
            return Err(
                GeometryError::Degenerate("cone radius must not be negative".into()).into(),
            );
        }
        let (axis, ref_dir) = orthonormal_frame(axis, ref_dir)?;
        Ok(Self {
            center,
            radius,
            axis,
            half_angle,
            ref_dir,
        })
    }

    /// Returns the center of the reference circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the reference circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the axis direction (unit vector).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the signed half-angle in radians.
    #[must_use]
    pub fn half_angle(&self) -> f64 {
        self.half_angle
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

impl Surface for Cone {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        let (sa, ca) = self.half_angle.sin_cos();
        let r = self.radius + v * sa;
        Ok(self.center + self.radial(u) * r + self.axis * (v * ca))
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        let (sa, ca) = self.half_angle.sin_cos();
        if (self.radius + v * sa).abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "cone normal is degenerate at apex".into(),
            )
            .into());
        }
        // Perpendicular to the generator `sa * radial + ca * axis`, pointing away from the axis
        Ok(self.radial(u) * ca - self.axis * sa)
    }

    fn inverse(&self, point: &Point3) -> Result<(f64, f64)> {
        let dp = point - self.center;
        let binormal = self.axis.cross(&self.ref_dir);
        let u = dp.dot(&binormal).atan2(dp.dot(&self.ref_dir));
        let h = dp.dot(&self.axis);
        let rho = (dp - self.axis * h).norm();
        let (sa, ca) = self.half_angle.sin_cos();
        let v = (rho - self.radius) * sa + h * ca;
        Ok((u, v))
    }

    fn domain(&self) -> SurfaceDomain {
        let apex_v = -self.radius / self.half_angle.sin();
        if self.half_angle > 0.0 {
            SurfaceDomain::new(0.0, FULL_TURN, apex_v, f64::INFINITY)
        } else {
            SurfaceDomain::new(0.0, FULL_TURN, f64::NEG_INFINITY, apex_v)
        }
    }

    fn u_period(&self) -> Option<f64> {
        Some(FULL_TURN)
    }
}
