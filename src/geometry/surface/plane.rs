use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// An unbounded plane, `P(u, v) = origin + u * u_dir + v * v_dir`.
///
/// The frame is orthonormal and right-handed: `normal = u_dir x v_dir`.
/// Plate tops and bottoms are the planes whose normal lies on the layering
/// axis.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane spanned by `u_dir` and `v_dir`.
    ///
    /// `u_dir` is kept as given (normalized); `v_dir` only picks the side, and
    /// is replaced by the in-plane direction perpendicular to `u_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if either direction is zero-length or they are parallel.
    pub fn new(origin: Point3, u_dir: Vector3, v_dir: Vector3) -> Result<Self> {
        if u_dir.norm() < TOLERANCE || v_dir.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let u_dir = u_dir.normalize();
        let normal = u_dir
            .cross(&v_dir)
            .try_normalize(TOLERANCE)
            .ok_or_else(|| GeometryError::Degenerate("plane directions are parallel".into()))?;
        Ok(Self {
            origin,
            u_dir,
            v_dir: normal.cross(&u_dir),
            normal,
        })
    }

    /// Creates a plane through `origin` facing `normal`, with an arbitrary
    /// in-plane frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let normal = normal
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;
        // Any axis that is not nearly parallel to the normal gives a stable frame.
        let seed = if normal.z.abs() < 0.9 {
            Vector3::z()
        } else {
            Vector3::x()
        };
        let u_dir = seed.cross(&normal).normalize();
        Ok(Self {
            origin,
            u_dir,
            v_dir: normal.cross(&u_dir),
            normal,
        })
    }

    /// Returns the point at `(0, 0)`.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit U direction.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the unit V direction.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the unit normal, which also serves as the plane's axis.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.origin + self.u_dir * u + self.v_dir * v)
    }

    fn normal(&self, _u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.normal)
    }

    fn inverse(&self, point: &Point3) -> Result<(f64, f64)> {
        let dp = point - self.origin;
        Ok((dp.dot(&self.u_dir), dp.dot(&self.v_dir)))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY)
    }
}
